// src/main.rs

fn main() -> anyhow::Result<()> {
    imagecheckr::cli::run()
}
