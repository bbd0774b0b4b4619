fn main() -> anyhow::Result<()> {
    ixa_interventions::runner::run()
}
