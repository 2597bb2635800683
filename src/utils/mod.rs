pub mod x_url;

#[cfg(test)]
pub mod test_app_state;
