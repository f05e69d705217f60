use serde::Deserialize;

use crate::traits::TryResolve;
use crate::PaginationConfigurationError;


/// Page size used when the `pagination` table or its `items_per_page` field is missing.
pub const DEFAULT_ITEMS_PER_PAGE: u32 = 10;

const MINIMUM_ITEMS_PER_PAGE: u32 = 1;
const MAXIMUM_ITEMS_PER_PAGE: u32 = 100;


#[derive(Deserialize, Debug, Default)]
pub(crate) struct UnresolvedPaginationConfiguration {
    items_per_page: Option<u32>,
}


/// Listing-related configuration.
#[derive(Debug, Clone)]
pub struct PaginationConfiguration {
    /// How many categories or recipes a single listing page shows.
    pub items_per_page: u32,
}

impl Default for PaginationConfiguration {
    fn default() -> Self {
        Self {
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
        }
    }
}


impl TryResolve for UnresolvedPaginationConfiguration {
    type Resolved = PaginationConfiguration;
    type Error = PaginationConfigurationError;

    fn try_resolve(self) -> Result<Self::Resolved, Self::Error> {
        let items_per_page = self.items_per_page.unwrap_or(DEFAULT_ITEMS_PER_PAGE);

        if !(MINIMUM_ITEMS_PER_PAGE..=MAXIMUM_ITEMS_PER_PAGE).contains(&items_per_page) {
            return Err(PaginationConfigurationError::ItemsPerPageOutOfRange {
                value: items_per_page,
                minimum: MINIMUM_ITEMS_PER_PAGE,
                maximum: MAXIMUM_ITEMS_PER_PAGE,
            });
        }

        Ok(PaginationConfiguration { items_per_page })
    }
}
