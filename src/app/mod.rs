pub mod ports;
pub mod price_use_case;
pub mod screen_use_case;

pub use price_use_case::PriceUseCase;
pub use screen_use_case::ScreenUseCase;
