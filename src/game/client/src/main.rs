mod entry;
mod headless;

fn main() {
	use socketmc_util::debug::error::ErrorFormatExt;

	// Initialize the logger
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

	color_backtrace::install();

	// Delegate to the inner entry function
	if let Err(err) = entry::main_inner() {
		log::error!("Error while running the client: {}", err.format_error());
		std::process::exit(1);
	}
}
