use anyhow::{Context, Result};
use enrichment::{anomalies_to_table, enrich, DirLookupSource, EnrichmentConfig, Table};
use std::{env, fs, path::PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();
    info!("startup");

    // usage: enrichment <CONFIG_YAML> <INPUT_JSON> <LOOKUP_DIR> <OUT_DIR>
    let usage = "Usage: enrichment <CONFIG_YAML> <INPUT_JSON> <LOOKUP_DIR> <OUT_DIR>";
    let mut args = env::args().skip(1);
    let config_path = PathBuf::from(args.next().expect(usage));
    let input_path = PathBuf::from(args.next().expect(usage));
    let lookup_dir = PathBuf::from(args.next().expect(usage));
    let out_dir = PathBuf::from(args.next().expect(usage));

    // ─── 2) load config + primary dataset ────────────────────────────
    let config = EnrichmentConfig::from_yaml_file(&config_path)?;
    info!(
        config = %config_path.display(),
        lookups = config.lookups.len(),
        marine_mismatch_check = config.marine_mismatch_check,
        "loaded pipeline config"
    );

    let input_text = fs::read_to_string(&input_path)
        .with_context(|| format!("reading input data {}", input_path.display()))?;
    let primary = Table::from_json(&input_text)
        .with_context(|| format!("parsing input data {}", input_path.display()))?;
    info!(rows = primary.len(), "loaded primary dataset");

    // ─── 3) run enrichment ───────────────────────────────────────────
    let source = DirLookupSource::new(&lookup_dir);
    let output = enrich(&primary, &config, &source)?;

    // ─── 4) write outputs ────────────────────────────────────────────
    fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating output directory {}", out_dir.display()))?;

    let data_path = out_dir.join("data.json");
    fs::write(&data_path, output.data.to_json()?)
        .with_context(|| format!("writing {}", data_path.display()))?;

    let anomalies = anomalies_to_table(&output.anomalies, &config.identifier_column);
    let anomalies_path = out_dir.join("anomalies.json");
    fs::write(&anomalies_path, anomalies.to_json()?)
        .with_context(|| format!("writing {}", anomalies_path.display()))?;

    info!(
        rows = output.data.len(),
        anomalies = output.anomalies.len(),
        data = %data_path.display(),
        anomalies_file = %anomalies_path.display(),
        "enrichment run complete"
    );
    Ok(())
}
