// SPDX-License-Identifier: MPL-2.0
use crouton::config;
use crouton::domain::notification::{DisplayDuration, Style};
use crouton::infrastructure::{drive, LoggingPort, TokioScheduler};
use crouton::{HostContext, Manager, Request};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const HELP: &str = "\
crouton-demo: queue a few banners against an in-memory view tree

USAGE:
  crouton-demo [OPTIONS]

OPTIONS:
  --count N          number of banners to queue [default: 3]
  --duration-ms MS   display time per banner, negative for infinite
  --long             use the long display time from the settings file
  --enter-ms MS      enter animation length [default: 300]
  --exit-ms MS       exit animation length [default: 300]
  -h, --help         print this help
";

struct Args {
    count: usize,
    duration_ms: Option<i64>,
    long: bool,
    enter_ms: u64,
    exit_ms: u64,
}

fn parse_args() -> Result<Option<Args>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }
    Ok(Some(Args {
        count: args.opt_value_from_str("--count")?.unwrap_or(3),
        duration_ms: args.opt_value_from_str("--duration-ms")?,
        long: args.contains("--long"),
        enter_ms: args.opt_value_from_str("--enter-ms")?.unwrap_or(300),
        exit_ms: args.opt_value_from_str("--exit-ms")?.unwrap_or(300),
    }))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> crouton::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = match parse_args() {
        Ok(Some(args)) => args,
        Ok(None) => {
            print!("{HELP}");
            return Ok(());
        }
        Err(err) => {
            eprintln!("error: {err}\n\n{HELP}");
            std::process::exit(2);
        }
    };

    let settings = config::load().unwrap_or_default();
    let defaults = if args.long {
        settings.long_configuration()
    } else {
        settings.configuration()
    };
    let port = LoggingPort::new(
        Duration::from_millis(args.enter_ms),
        Duration::from_millis(args.exit_ms),
    );
    let (scheduler, mut events) = TokioScheduler::new();
    let mut manager = Manager::with_config(port, scheduler, &settings);

    let screen = HostContext::new("demo");
    let styles = [Style::info(), Style::confirm(), Style::alert()];
    for index in 0..args.count {
        let mut builder = Request::builder(&screen)
            .text(format!("Banner {}", index + 1))
            .style(styles[index % styles.len()].clone())
            .defaults(defaults);
        if let Some(millis) = args.duration_ms {
            builder = builder.duration(DisplayDuration::from_millis(millis));
        }
        manager.enqueue(builder.build()?);
    }

    drive(&mut manager, &mut events).await;
    if !manager.is_idle() {
        tracing::info!(live = ?manager.live(), "infinite banner still visible, clearing");
        manager.clear_for_context(screen.id());
    }

    for event in manager.journal().iter() {
        println!(
            "{:>4}  {}  {}  {:?}",
            event.sequence, event.request, event.context, event.transition
        );
    }
    Ok(())
}
