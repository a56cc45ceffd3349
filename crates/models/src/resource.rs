use uuid::Uuid;

/// What the ownership check needs from a downstream resource.
pub trait Resource {
    /// Owning customer. Project-level resources return `Uuid::nil()`.
    fn customer_id(&self) -> Uuid;
    /// Raw soft-delete timestamp, if the service sent one.
    fn tm_delete(&self) -> Option<&str>;

    fn is_deleted(&self) -> bool { common::utils::time::is_deleted(self.tm_delete()) }
}

/// Implement [`Resource`] for structs carrying `customer_id` and `tm_delete`.
#[macro_export]
macro_rules! impl_resource {
    ($($t:ty),+ $(,)?) => {
        $(
            impl $crate::resource::Resource for $t {
                fn customer_id(&self) -> uuid::Uuid { self.customer_id }
                fn tm_delete(&self) -> Option<&str> { self.tm_delete.as_deref() }
            }
        )+
    };
}
