mod import_configuration;

pub use import_configuration::ImportConfiguration;
