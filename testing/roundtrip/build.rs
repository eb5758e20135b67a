fn main() -> std::io::Result<()> {
    tablegen_build::build!("schema.json");

    Ok(())
}
