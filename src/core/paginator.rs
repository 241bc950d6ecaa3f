use crate::domain::model::{RawListing, Source};
use crate::domain::ports::PageFetcher;
use crate::utils::error::Result;

/// 逐頁取得某語言在某來源的全部職缺，依到達順序累積
///
/// 終止條件由來源回應的 `Continuation` 決定；任何一頁失敗都會直接回傳錯誤，不重試。
pub async fn fetch_all<F: PageFetcher + ?Sized>(
    fetcher: &F,
    source: Source,
    language: &str,
) -> Result<Vec<RawListing>> {
    let mut listings = Vec::new();
    let mut page = source.first_page();

    loop {
        let fetched = fetcher.fetch_page(source, language, page).await?;
        let received = fetched.listings.len();
        listings.extend(fetched.listings);

        tracing::debug!(
            "📄 {} '{}' page {}: {} listings (accumulated {}, {:?})",
            source,
            language,
            page,
            received,
            listings.len(),
            fetched.continuation
        );

        if fetched.continuation.is_exhausted(page, listings.len()) {
            break;
        }

        if received == 0 {
            tracing::warn!(
                "⚠️ {} '{}' page {} was empty before the declared end ({:?}), stopping",
                source,
                language,
                page,
                fetched.continuation
            );
            break;
        }

        page += 1;
    }

    Ok(listings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Continuation, Page};
    use crate::utils::error::EtlError;
    use std::sync::Mutex;

    /// 依頁索引回傳預先準備的頁面，並記錄被請求的頁
    struct ScriptedFetcher {
        pages: Vec<(u32, Page)>,
        calls: Mutex<Vec<u32>>,
        fail_on: Option<u32>,
    }

    impl ScriptedFetcher {
        fn new(pages: Vec<(u32, Page)>) -> Self {
            Self {
                pages,
                calls: Mutex::new(Vec::new()),
                fail_on: None,
            }
        }

        fn failing_on(mut self, page: u32) -> Self {
            self.fail_on = Some(page);
            self
        }

        fn calls(&self) -> Vec<u32> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl PageFetcher for ScriptedFetcher {
        async fn fetch_page(&self, source: Source, language: &str, page: u32) -> Result<Page> {
            self.calls.lock().unwrap().push(page);

            if self.fail_on == Some(page) {
                return Err(EtlError::source_unavailable(source, language, page, "HTTP 503"));
            }

            self.pages
                .iter()
                .find(|(index, _)| *index == page)
                .map(|(_, page)| page.clone())
                .ok_or_else(|| EtlError::source_unavailable(source, language, page, "HTTP 404"))
        }
    }

    fn listings(count: usize) -> Vec<RawListing> {
        (0..count)
            .map(|i| RawListing::new(Some("RUR"), Some(1000.0 * i as f64), None))
            .collect()
    }

    fn hh_page(count: usize, pages: u32) -> Page {
        Page {
            listings: listings(count),
            continuation: Continuation::Pages(pages),
        }
    }

    fn sj_page(count: usize, total: u64) -> Page {
        Page {
            listings: listings(count),
            continuation: Continuation::Total(total),
        }
    }

    #[tokio::test]
    async fn test_headhunter_fetches_exactly_declared_pages() {
        let fetcher = ScriptedFetcher::new(vec![
            (0, hh_page(100, 3)),
            (1, hh_page(100, 3)),
            (2, hh_page(40, 3)),
            (3, hh_page(0, 3)),
        ]);

        let result = fetch_all(&fetcher, Source::HeadHunter, "Python").await.unwrap();

        assert_eq!(fetcher.calls(), vec![0, 1, 2]);
        assert_eq!(result.len(), 240);
    }

    #[tokio::test]
    async fn test_superjob_stops_when_total_reached() {
        let fetcher = ScriptedFetcher::new(vec![
            (1, sj_page(100, 250)),
            (2, sj_page(100, 250)),
            (3, sj_page(50, 250)),
            (4, sj_page(0, 250)),
        ]);

        let result = fetch_all(&fetcher, Source::SuperJob, "Go").await.unwrap();

        assert_eq!(fetcher.calls(), vec![1, 2, 3]);
        assert_eq!(result.len(), 250);
    }

    #[tokio::test]
    async fn test_zero_results_terminate_after_one_fetch() {
        let hh = ScriptedFetcher::new(vec![(0, hh_page(0, 0))]);
        let result = fetch_all(&hh, Source::HeadHunter, "Swift").await.unwrap();
        assert!(result.is_empty());
        assert_eq!(hh.calls(), vec![0]);

        let sj = ScriptedFetcher::new(vec![(1, sj_page(0, 0))]);
        let result = fetch_all(&sj, Source::SuperJob, "Swift").await.unwrap();
        assert!(result.is_empty());
        assert_eq!(sj.calls(), vec![1]);
    }

    #[tokio::test]
    async fn test_empty_page_before_declared_total_stops() {
        let fetcher = ScriptedFetcher::new(vec![(1, sj_page(20, 500)), (2, sj_page(0, 500))]);

        let result = fetch_all(&fetcher, Source::SuperJob, "Kotlin").await.unwrap();

        assert_eq!(fetcher.calls(), vec![1, 2]);
        assert_eq!(result.len(), 20);
    }

    #[tokio::test]
    async fn test_failure_is_propagated_not_treated_as_empty() {
        let fetcher = ScriptedFetcher::new(vec![(0, hh_page(100, 5)), (1, hh_page(100, 5))])
            .failing_on(1);

        let err = fetch_all(&fetcher, Source::HeadHunter, "Java").await.unwrap_err();

        assert!(matches!(err, EtlError::SourceUnavailable { page: 1, .. }));
        assert_eq!(fetcher.calls(), vec![0, 1]);
    }
}
