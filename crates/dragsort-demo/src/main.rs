#![forbid(unsafe_code)]

//! dragsort demo binary entry point.

use dragsort_demo::cli;
use dragsort_demo::walkthrough;
use tracing_subscriber::EnvFilter;

fn init_logging() {
    let filter = EnvFilter::try_from_env("DRAGSORT_DEMO_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let opts = cli::Opts::parse();
    init_logging();

    let report = match walkthrough::run(&opts) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Demo error: {e}");
            std::process::exit(1);
        }
    };

    println!(
        "{} items, {} visible rows, overlay {} at {:.2}",
        opts.items, opts.rows, opts.color, opts.opacity
    );
    match (&report.dragged, report.dropped_at) {
        (Some(name), Some(position)) => println!(
            "Dragged {name:?} from row {} to position {position} ({} auto-scroll ticks{})",
            opts.from,
            report.ticks,
            if report.reached_boundary {
                ", reached the end"
            } else {
                ""
            }
        ),
        _ => println!("No drag started (drag mode off or press missed the handle)"),
    }
    println!();
    for line in &report.screen {
        println!("{line}");
    }
    println!();
    println!("Order: {}", report.after.join(", "));
}
