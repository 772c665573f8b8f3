use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use titanic_batches::{LoaderConfig, Repository};

const CONFIG_ENV: &str = "TITANIC_CONFIG";
const DEFAULT_CONFIG: &str = "loader.json";

fn main() -> Result<()> {
    env_logger::init();

    let config = load_config()?;
    config.validate().context("invalid loader configuration")?;
    let options = config.load_options();

    let train = Repository::training_with(&config.train_path, &options)
        .with_context(|| format!("loading {}", config.train_path.display()))?;
    drain("training", seeded(train, config.seed), config.batch_size)?;

    if let (Some(test_path), Some(labels_path)) = (&config.test_path, &config.labels_path) {
        let test = Repository::testing_with(test_path, labels_path, &options)
            .with_context(|| format!("loading {} with {}", test_path.display(), labels_path.display()))?;
        drain("testing", seeded(test, config.seed), config.batch_size)?;
    }

    Ok(())
}

/// Config from `$TITANIC_CONFIG`, else `loader.json` if present, else defaults.
fn load_config() -> Result<LoaderConfig> {
    match env::var_os(CONFIG_ENV) {
        Some(path) => LoaderConfig::load(PathBuf::from(path)),
        None if PathBuf::from(DEFAULT_CONFIG).exists() => LoaderConfig::load(DEFAULT_CONFIG),
        None => {
            log::info!("no {DEFAULT_CONFIG} found, using default configuration");
            Ok(LoaderConfig::default())
        }
    }
}

fn seeded(repo: Repository, seed: Option<u64>) -> Repository {
    match seed {
        Some(seed) => repo.with_seed(seed),
        None => repo,
    }
}

/// One pass over the repository, reporting each batch's survival rate.
fn drain(name: &str, mut repo: Repository, batch_size: usize) -> Result<()> {
    let total = repo.len();
    let mut batches = 0;
    for batch in repo.drain_batches(batch_size) {
        let batch = batch?;
        batches += 1;
        log::info!(
            "{name} batch {batches}: {} samples, survival rate {:.2}",
            batch.len(),
            batch.positive_rate().unwrap_or(0.0)
        );
    }
    if !repo.is_empty() {
        log::warn!(
            "{name}: {} of {total} samples left over (smaller than one batch of {batch_size})",
            repo.len()
        );
    }
    println!("{name}: {batches} batches of {batch_size} from {total} samples");
    Ok(())
}
