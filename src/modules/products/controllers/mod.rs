mod product_controller;

pub use product_controller::configure_product_routes;
