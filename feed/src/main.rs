use std::fs::File;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use fodder_feed::FeedPredictor;
use fodder_linear::LinearRegression;
use log::info;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Age of the animal
    #[arg(long, default_value_t = 3.0)]
    age: f64,

    /// Weight of the animal
    #[arg(long, default_value_t = 280.0)]
    weight: f64,

    /// Health score of the animal
    #[arg(long, default_value_t = 8.0)]
    health_score: f64,

    /// CSV file with `age,weight,health_score,feed_amount` rows to train on
    /// If this parameter is not provided, the reference herd is used
    #[arg(short, long, default_value = None)]
    data: Option<PathBuf>,

    /// The CSV file has no header row
    #[arg(long)]
    no_headers: bool,

    /// Fit the model through the origin
    #[arg(long)]
    no_intercept: bool,

    /// Relative cutoff for small singular values
    #[arg(long, default_value = None)]
    rcond: Option<f64>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut params = LinearRegression::new().with_intercept(!args.no_intercept);
    if let Some(rcond) = args.rcond {
        params = params.rcond(rcond);
    }

    let predictor = match &args.data {
        Some(path) => {
            info!("training on {}", path.display());
            let file = File::open(path)
                .with_context(|| format!("could not open {}", path.display()))?;
            FeedPredictor::train_from_csv(params, file, !args.no_headers)?
        }
        None => {
            info!("training on the reference herd");
            FeedPredictor::train_with(params, &fodder_datasets::herd())?
        }
    };

    let feed = predictor.predict_feed(args.age, args.weight, args.health_score)?;
    println!("Predicted feed amount: {}", feed);

    Ok(())
}
