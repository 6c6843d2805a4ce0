/// Read-side methods shared by every store client: `get_<name>`,
/// `fetch_<name>`, `list_<name>s` (oldest first) and `count_<name>s`.
#[macro_export]
macro_rules! impl_client_methods {
    ($client_name:ident, $field:ident, $entity:ty, $entity_name_snake:ident) => {
        paste::paste! {
            #[allow(dead_code)]
            impl $client_name {
                #[tracing::instrument(skip(self))]
                pub async fn [<get_ $entity_name_snake>](&self, id: String) -> $crate::error::LogisticsResult<Option<$entity>> {
                    tracing::debug!("Sending request");
                    self.$field.get(id).await
                }

                #[tracing::instrument(skip(self))]
                pub async fn [<fetch_ $entity_name_snake>](&self, id: String) -> $crate::error::LogisticsResult<$entity> {
                    tracing::debug!("Sending request");
                    self.$field.fetch(id).await
                }

                #[tracing::instrument(skip(self))]
                pub async fn [<list_ $entity_name_snake s>](&self) -> $crate::error::LogisticsResult<Vec<$entity>> {
                    tracing::debug!("Sending request");
                    let mut items = self.$field.list().await?;
                    items.sort_by(|a, b| {
                        $crate::clients::by_sequence(
                            <$entity as $crate::actor_framework::Entity>::id(a),
                            <$entity as $crate::actor_framework::Entity>::id(b),
                        )
                    });
                    Ok(items)
                }

                #[tracing::instrument(skip(self))]
                pub async fn [<count_ $entity_name_snake s>](&self) -> $crate::error::LogisticsResult<usize> {
                    self.$field.count().await
                }
            }
        }
    };
}

#[macro_export]
macro_rules! impl_client_new {
    ($client_name:ident, $entity:ty) => {
        impl $client_name {
            pub fn new(inner: $crate::actor_framework::ResourceClient<$entity>) -> Self {
                Self { inner }
            }
        }
    };
}

#[macro_export]
macro_rules! impl_basic_client {
    ($client_name:ident, $entity:ty, $entity_name_snake:ident) => {
        $crate::impl_client_new!($client_name, $entity);
        $crate::impl_client_methods!($client_name, inner, $entity, $entity_name_snake);
    };
}
