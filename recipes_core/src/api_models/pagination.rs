use serde::Serialize;
use thiserror::Error;


#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidPageError {
    #[error("page number must be positive, got {}", .page)]
    NotPositive { page: i64 },

    #[error("page number {} is too large", .page)]
    TooLarge { page: i64 },
}


/// A validated request for one page of a listing.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct PageRequest {
    page: u32,
    items_per_page: u32,
}

impl PageRequest {
    pub fn new(page: i64, items_per_page: u32) -> Result<Self, InvalidPageError> {
        if page < 1 {
            return Err(InvalidPageError::NotPositive { page });
        }

        let page = u32::try_from(page).map_err(|_| InvalidPageError::TooLarge { page })?;

        Ok(Self {
            page,
            items_per_page: items_per_page.max(1),
        })
    }

    #[inline]
    pub fn page(&self) -> u32 {
        self.page
    }

    #[inline]
    pub fn items_per_page(&self) -> u32 {
        self.items_per_page
    }

    /// Value for a SQL `LIMIT` clause.
    #[inline]
    pub fn limit(&self) -> i64 {
        i64::from(self.items_per_page)
    }

    /// Value for a SQL `OFFSET` clause.
    #[inline]
    pub fn offset(&self) -> i64 {
        i64::from(self.page - 1) * i64::from(self.items_per_page)
    }
}



/// One page of a listing, along with the information needed to render page navigation.
#[derive(Serialize, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde_impls_for_client_on_models", derive(serde::Deserialize))]
pub struct Page<T> {
    pub items: Vec<T>,

    pub current_page: u32,

    pub items_per_page: u32,

    pub total_item_count: u64,

    pub page_count: u32,
}

impl<T> Page<T> {
    pub fn new(request: PageRequest, items: Vec<T>, total_item_count: u64) -> Self {
        let items_per_page = u64::from(request.items_per_page());
        let page_count = total_item_count.div_ceil(items_per_page);

        Self {
            items,
            current_page: request.page(),
            items_per_page: request.items_per_page(),
            total_item_count,
            page_count: u32::try_from(page_count).unwrap_or(u32::MAX),
        }
    }
}



#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn rejects_non_positive_pages() {
        assert_eq!(
            PageRequest::new(0, 10),
            Err(InvalidPageError::NotPositive { page: 0 })
        );
        assert_eq!(
            PageRequest::new(-4, 10),
            Err(InvalidPageError::NotPositive { page: -4 })
        );
        assert_eq!(
            PageRequest::new(i64::MAX, 10),
            Err(InvalidPageError::TooLarge { page: i64::MAX })
        );
    }

    #[test]
    fn computes_limit_and_offset() {
        let first_page = PageRequest::new(1, 10).unwrap();
        assert_eq!(first_page.limit(), 10);
        assert_eq!(first_page.offset(), 0);

        let third_page = PageRequest::new(3, 10).unwrap();
        assert_eq!(third_page.offset(), 20);
    }

    #[test]
    fn counts_pages() {
        let request = PageRequest::new(1, 10).unwrap();

        assert_eq!(Page::<u8>::new(request, vec![], 0).page_count, 0);
        assert_eq!(Page::<u8>::new(request, vec![], 10).page_count, 1);
        assert_eq!(Page::<u8>::new(request, vec![], 11).page_count, 2);
    }
}
