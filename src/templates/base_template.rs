/// Base template trait providing common properties for all templates.
/// This eliminates redundant field definitions across templates.
pub trait BaseTemplate {
    fn shop(&self) -> &str;
    fn api_key(&self) -> &str;
}

/// Macro to implement BaseTemplate for a struct with standard fields
#[macro_export]
macro_rules! impl_base_template {
    ($struct_name:ty) => {
        impl $crate::templates::BaseTemplate for $struct_name {
            fn shop(&self) -> &str {
                &self.shop
            }
            fn api_key(&self) -> &str {
                &self.api_key
            }
        }
    };
}
