pub mod annotator;
pub mod descriptor_builder;
pub mod media_selector;
pub mod resolver;
pub mod twitter_client;
