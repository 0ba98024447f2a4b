//! Where layout metadata comes from.

use layoutgen_dataapi::{DataApiClient, FieldMetaData, LayoutMetadataResponse};
use layoutgen_typegen::{FieldDescriptor, LayoutMetadata, ValueList};

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The server reports no layout by that name; the run skips it.
    #[error("layout {0:?} not found")]
    NotFound(String),

    #[error("failed to fetch metadata for layout {layout:?}")]
    Other {
        layout: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Supplies layout metadata to the pipeline.
pub trait MetadataSource {
    fn fetch_metadata(&mut self, layout: &str) -> Result<LayoutMetadata, FetchError>;
}

impl MetadataSource for DataApiClient {
    fn fetch_metadata(&mut self, layout: &str) -> Result<LayoutMetadata, FetchError> {
        match self.layout_metadata(layout) {
            Ok(response) => Ok(from_wire(response)),
            Err(e) if e.is_layout_missing() => Err(FetchError::NotFound(layout.to_string())),
            Err(e) => Err(FetchError::Other {
                layout: layout.to_string(),
                source: Box::new(e),
            }),
        }
    }
}

/// Keep only what generation reads from a Data API metadata response.
pub fn from_wire(response: LayoutMetadataResponse) -> LayoutMetadata {
    LayoutMetadata {
        fields: response.field_meta_data.into_iter().map(field).collect(),
        portals: response
            .portal_meta_data
            .into_iter()
            .map(|(name, fields)| (name, fields.into_iter().map(field).collect()))
            .collect(),
        value_lists: response.value_lists.map(|lists| {
            lists
                .into_iter()
                .map(|list| ValueList {
                    name: list.name,
                    values: list.values.into_iter().map(|entry| entry.value).collect(),
                })
                .collect()
        }),
    }
}

fn field(meta: FieldMetaData) -> FieldDescriptor {
    FieldDescriptor {
        name: meta.name,
        result: meta.result,
        value_list: meta.value_list,
    }
}
