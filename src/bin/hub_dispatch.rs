use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use tracing::info;

use hub_dispatch::config::DispatchConfig;
use hub_dispatch::constructive::assign_packages;
use hub_dispatch::io::{read_distances, read_locations, read_packages};
use hub_dispatch::models::{Package, PackageStatus, PackageStore};
use hub_dispatch::simulation::{DeliverySimulator, MileageBudget};

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Canonical address table (index,name,address)
    #[arg(short, long)]
    addresses: PathBuf,

    /// Package table (id,address,city,state,zip,deadline,weight[,note])
    #[arg(short, long)]
    packages: PathBuf,

    /// Distance table, one row per location
    #[arg(short = 'm', long)]
    distances: PathBuf,

    /// JSON file overriding the default fleet parameters
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Fill missing distances from the reverse direction
    #[arg(long)]
    mirror: bool,

    /// Print a single package after the run
    #[arg(short, long)]
    lookup: Option<u32>,

    /// Only list packages with this status
    #[arg(short, long, value_enum)]
    status: Option<StatusFilter>,

    #[arg(short, long)]
    debug: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum StatusFilter {
    AtHub,
    InTransit,
    Delivered,
}

impl From<StatusFilter> for PackageStatus {
    fn from(value: StatusFilter) -> Self {
        match value {
            StatusFilter::AtHub => PackageStatus::AtHub,
            StatusFilter::InTransit => PackageStatus::InTransit,
            StatusFilter::Delivered => PackageStatus::Delivered,
        }
    }
}

fn open(path: &Path) -> anyhow::Result<File> {
    File::open(path).with_context(|| format!("cannot open {}", path.display()))
}

fn load_config(path: Option<&Path>) -> anyhow::Result<DispatchConfig> {
    let config = match path {
        Some(path) => serde_json::from_reader(open(path)?)
            .with_context(|| format!("invalid config {}", path.display()))?,
        None => DispatchConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

fn package_row(p: &Package) -> Vec<String> {
    vec![
        p.id().to_string(),
        p.address().to_string(),
        p.city().to_string(),
        p.state().to_string(),
        p.zip().to_string(),
        p.deadline().to_string(),
        p.weight().to_string(),
        p.status().to_string(),
        p.truck().map(|t| t.to_string()).unwrap_or_default(),
        p.delivered_at()
            .map(|at| at.strftime("%I:%M %p").to_string())
            .unwrap_or_default(),
    ]
}

fn package_table<'p>(rows: impl IntoIterator<Item = &'p Package>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "ID", "Address", "City", "St", "ZIP", "Deadline", "Weight", "Status", "Truck",
            "Delivered",
        ]);
    for p in rows {
        table.add_row(package_row(p));
    }
    table
}

fn print_packages(packages: &PackageStore, status: Option<PackageStatus>) {
    let table = match status {
        Some(status) => package_table(packages.with_status(status)),
        None => package_table(packages.iter()),
    };
    println!("{table}");
}

fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    let config = load_config(cli.config.as_deref())?;
    let locations = read_locations(open(&cli.addresses)?)
        .with_context(|| format!("cannot read {}", cli.addresses.display()))?;
    let mut packages = read_packages(open(&cli.packages)?)
        .with_context(|| format!("cannot read {}", cli.packages.display()))?;
    let mut distances = read_distances(open(&cli.distances)?)
        .with_context(|| format!("cannot read {}", cli.distances.display()))?;
    if cli.mirror {
        distances.mirror_missing();
    }
    info!(
        locations = locations.len(),
        packages = packages.len(),
        matrix = distances.size(),
        "inputs loaded"
    );

    let mut fleet = config.build_fleet();
    assign_packages(&mut packages, &mut fleet, config.truck_capacity)?;

    let mut budget = MileageBudget::new(config.mileage_cap);
    let report = DeliverySimulator::from_config(&distances, &locations, &config)?
        .deliver_all(&mut fleet, &mut packages, &mut budget);

    for truck in &fleet {
        println!("{truck}");
    }
    println!("Total Delivered: {}", report.delivered_count());
    println!("Total Miles Traveled: {:.1}", report.total_miles());
    let late = report.late_packages(&packages);
    if !late.is_empty() {
        println!("Late: {late:?}");
    }
    for issue in &report.issues {
        println!("Issue: {issue}");
    }
    println!();

    match cli.lookup {
        Some(id) => match packages.lookup(id) {
            Some(p) => println!("{}", package_table([p])),
            None => println!("Package {id} not found"),
        },
        None => print_packages(&packages, cli.status.map(PackageStatus::from)),
    }
    Ok(())
}
