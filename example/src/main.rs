fn main() -> Result<(), Box<dyn std::error::Error>> {
    slidepay_ui::logging::init_tracing();
    example::run()
}
