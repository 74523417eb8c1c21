mod category_controller;

pub use category_controller::configure_category_routes;
