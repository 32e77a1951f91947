//! FILENAME: core/exhibit-engine/src/bin/exhibit_demo.rs
//! PURPOSE: Builds a loss development exhibit on an in-memory workbook, drives
//! a few filter changes and prints the rendered region after each.
//! Usage: exhibit-demo [config.json]

use std::process::ExitCode;

use engine::{parse_range, Workbook};
use exhibit_engine::logging::{self, log_error, log_info};
use exhibit_engine::{Exhibit, ExhibitConfig, ExhibitError, HostSession, LossDevelopmentExhibit};
use log::LevelFilter;
use triangle::sample;

type DemoExhibit<'a> = LossDevelopmentExhibit<triangle::Triangle, &'a mut Workbook>;

fn print_region(exhibit: &DemoExhibit<'_>) -> Result<(), ExhibitError> {
    let (Some(sheet), Some(address)) = (exhibit.sheet(), exhibit.last_rendered_address()) else {
        return Ok(());
    };
    let range = parse_range(address)?;
    let grid = &exhibit.host().sheet(sheet)?.grid;
    println!("{}", address);
    for row in grid.read_block(&range) {
        let line: Vec<String> = row.iter().map(|v| format!("{:>10}", v.display_value())).collect();
        println!("{}", line.join(" "));
    }
    println!();
    Ok(())
}

fn pick(
    exhibit: &mut DemoExhibit<'_>,
    dimension: &str,
    label: &str,
) -> Result<(), ExhibitError> {
    let Some(control) = exhibit.control_for(dimension) else {
        return Err(ExhibitError::SelectionNotFound {
            dimension: dimension.to_string(),
            label: label.to_string(),
        });
    };
    exhibit.host_mut().select(control, label)?;
    let report = exhibit.dispatch_pending();
    log_info!(
        "DEMO",
        "{} -> {}: {} refresh(es), {} error(s)",
        dimension,
        label,
        report.refreshes,
        report.errors.len()
    );
    Ok(())
}

fn run() -> Result<(), ExhibitError> {
    let config = match std::env::args().nth(1) {
        Some(path) => ExhibitConfig::from_path(path)?,
        None => ExhibitConfig::default(),
    };

    // Raw records carry a Region axis the exhibit does not filter on.
    let dataset = sample::claims_by_region()?.group_by(&["Line", "Type"])?;

    let mut session = HostSession::open(Workbook::new());
    {
        let mut exhibit = LossDevelopmentExhibit::new(dataset, session.host_mut(), config);
        exhibit.load()?;
        print_region(&exhibit)?;

        pick(&mut exhibit, "Line", "Property")?;
        print_region(&exhibit)?;

        pick(&mut exhibit, "Amount", "Paid")?;
        print_region(&exhibit)?;
    }
    session.close()?;
    Ok(())
}

fn main() -> ExitCode {
    if let Err(e) = logging::init(LevelFilter::Info) {
        eprintln!("logger: {}", e);
    }
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log_error!("DEMO", "{}", e);
            ExitCode::FAILURE
        }
    }
}
