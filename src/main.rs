fn main() -> anyhow::Result<()> {
    request_criteria::run()
}
