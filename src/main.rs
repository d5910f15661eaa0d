use anyhow::Context;

fn main() -> anyhow::Result<()> {
    presslock::run().context("presslock exited with an error")
}
