use log::info;
use savings::savings::{simulate, ReportEvent, SimulationParameters};
use simple_logger::SimpleLogger;

fn main() {
    SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .init()
        .unwrap();

    let params = SimulationParameters::default();
    info!("{} deposits scheduled", params.deposits.len());

    let result = simulate(&params);

    for event in &result.trace {
        if let ReportEvent::FinalBalance { .. } = event {
            println!();
        }
        println!("{}", event);
    }
}

// verifies that types can implement the gated traits below
#[cfg(test)]
fn is_normal<T: Sized + Send + Sync + Unpin>() {}

#[test]
fn normal_types() {
    is_normal::<ReportEvent>();
    is_normal::<SimulationParameters>();
    is_normal::<savings::savings::SimulationResult>();
    is_normal::<savings::deposit::DepositEvent>();
}
