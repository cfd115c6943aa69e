fn main() -> Result<(), Box<dyn std::error::Error>> {
    chathub::cli::main()
}
