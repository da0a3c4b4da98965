fn main() -> anyhow::Result<()> {
    schemagen::cli::run_cli()
}
