pub(crate) mod catalog_client;
pub(crate) mod pagination_client;
