pub mod city_form;
pub mod report_panel;
pub mod weather_card;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use city_form::{CityForm, CityFormProps};
pub use report_panel::{ReportPanel, ReportPanelProps};
pub use weather_card::{WeatherCard, WeatherCardProps};
