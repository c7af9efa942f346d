fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let out_dir = generate_cards::resolve_out_dir(
        std::env::args().nth(1),
        std::env::var(generate_cards::OUT_DIR_ENV).ok(),
    );
    let report = generate_cards::generate(&out_dir)?;
    log::info!(
        "Wrote {} files to {}",
        report.files_written,
        report.out_dir.display()
    );
    Ok(())
}
