mod card_view;
mod catalog_loader;
mod constellation_view;
mod landing_view;
mod page_app;
mod page_config;

fn main() {
    console_error_panic_hook::set_once();
    page_app::run();
}
