//! Quiz orchestration: catalog lookup, fetch, extraction, excerpt and answers.
//!
//! Extraction is stateless and runs concurrently across requests. Answer
//! mutations are serialized behind one lock because each rewrites the whole
//! persisted set. The rewrite itself runs on the blocking pool while the lock
//! is held.

use std::sync::{Arc, Mutex, PoisonError};

use rand::{Rng, RngCore};
use stanza_client::{ContentExtractor, PageFetcher, PoemContent, select_excerpt};
use stanza_core::{AnswerState, Error, SourceCatalog};

/// One rendered quiz question.
#[derive(Debug, Clone)]
pub struct QuizRound {
    pub index: usize,
    pub url: String,
    pub content: PoemContent,
    /// Empty when the poem yielded no text.
    pub excerpt: String,
}

/// Where to send the user after an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Next {
    Poem(usize),
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryStatus {
    pub index: usize,
    pub correct: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    pub correct: usize,
    pub total: usize,
    pub entries: Vec<EntryStatus>,
}

pub struct Quiz {
    catalog: SourceCatalog,
    answers: Arc<tokio::sync::Mutex<AnswerState>>,
    fetcher: Arc<dyn PageFetcher>,
    extractor: ContentExtractor,
    rng: Mutex<Box<dyn RngCore + Send>>,
    excerpt_lines: usize,
}

impl Quiz {
    pub fn new(
        catalog: SourceCatalog, answers: AnswerState, fetcher: Arc<dyn PageFetcher>, extractor: ContentExtractor,
        rng: Box<dyn RngCore + Send>, excerpt_lines: usize,
    ) -> Self {
        Self {
            catalog,
            answers: Arc::new(tokio::sync::Mutex::new(answers)),
            fetcher,
            extractor,
            rng: Mutex::new(rng),
            excerpt_lines,
        }
    }

    pub fn total(&self) -> usize {
        self.catalog.len()
    }

    fn with_rng<T>(&self, f: impl FnOnce(&mut (dyn RngCore + Send)) -> T) -> T {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut **rng)
    }

    /// Uniform random catalog index.
    pub fn random_index(&self) -> usize {
        let total = self.total();
        self.with_rng(|rng| rng.gen_range(0..total))
    }

    /// Fetch, extract and excerpt the poem at `index`.
    pub async fn question(&self, index: usize) -> Result<QuizRound, Error> {
        let entry = self
            .catalog
            .get(index)
            .ok_or_else(|| Error::InvalidInput(format!("no poem at index {} (catalog has {})", index, self.total())))?;

        tracing::info!(index, url = %entry.source_url, "rendering poem");

        let raw = self.fetcher.fetch_page(&entry.source_url).await?;
        let content = self.extractor.extract(&entry.source_url, &raw)?;
        let excerpt = self.with_rng(|rng| select_excerpt(&content.body_text, self.excerpt_lines, rng));

        if excerpt.is_empty() {
            tracing::warn!(index, url = %entry.source_url, "poem produced no text to excerpt");
        }

        Ok(QuizRound { index, url: entry.source_url.clone(), content, excerpt })
    }

    pub async fn mark_correct(&self, index: usize) -> Result<Next, Error> {
        let (removed, next) = self.update(move |answers| answers.mark_correct(index)).await?;
        if removed {
            tracing::info!(index, "marked correct");
        }
        Ok(next)
    }

    pub async fn mark_wrong(&self, index: usize) -> Result<Next, Error> {
        let ((), next) = self.update(move |answers| answers.mark_wrong(index)).await?;
        tracing::info!(index, "marked wrong");
        Ok(next)
    }

    /// Apply `change` under the answer lock on the blocking pool, since it
    /// writes the state file, then pick where to go next.
    async fn update<T: Send + 'static>(
        &self, change: impl FnOnce(&mut AnswerState) -> Result<T, Error> + Send + 'static,
    ) -> Result<(T, Next), Error> {
        let mut answers = Arc::clone(&self.answers).lock_owned().await;
        let (answers, result) = tokio::task::spawn_blocking(move || {
            let result = change(&mut answers);
            (answers, result)
        })
        .await
        .map_err(|e| Error::Persistence(format!("answer update task failed: {e}")))?;

        let value = result?;
        Ok((value, self.next_after(&answers)))
    }

    fn next_after(&self, answers: &AnswerState) -> Next {
        match self.with_rng(|rng| answers.next_wrong_index(rng)) {
            Some(index) => Next::Poem(index),
            None => Next::Complete,
        }
    }

    pub async fn status(&self) -> StatusReport {
        let answers = self.answers.lock().await;
        let status = answers.status();
        let entries = (0..status.total)
            .map(|index| EntryStatus { index, correct: !answers.is_wrong(index) })
            .collect();

        StatusReport { correct: status.correct, total: status.total, entries }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use bytes::Bytes;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use stanza_core::JsonFileStore;
    use std::collections::HashMap;

    /// Serves fixed markup per URL; anything else is a 404.
    pub(crate) struct StubFetcher {
        pages: HashMap<String, String>,
    }

    impl StubFetcher {
        pub(crate) fn new(pages: &[(&str, &str)]) -> Self {
            Self { pages: pages.iter().map(|(u, p)| (u.to_string(), p.to_string())).collect() }
        }
    }

    #[async_trait]
    impl PageFetcher for StubFetcher {
        async fn fetch_page(&self, url: &str) -> Result<Bytes, Error> {
            self.pages
                .get(url)
                .map(|page| Bytes::from(page.clone()))
                .ok_or_else(|| Error::HttpError(format!("{} returned status 404", url)))
        }
    }

    pub(crate) const POETS_URL: &str = "https://www.poets.org/poem/x";
    pub(crate) const POETS_PAGE: &str = "<title>Mending Wall</title><span class=\"node-title\">Robert Frost</span>\
        <pre>Something there is that doesn't love a wall,\n\nThat sends the frozen-ground-swell under it,\n\
        And spills the upper boulders in the sun;\nAnd makes gaps even two can pass abreast.\n\n\
        The work of hunters is another thing:\nI have come after them and made repair</pre>";

    pub(crate) fn quiz(dir: &tempfile::TempDir, urls: &[&str], fetcher: StubFetcher) -> Quiz {
        let catalog = SourceCatalog::parse(&urls.join("\n")).unwrap();
        let answers = AnswerState::load(Box::new(JsonFileStore::new(dir.path().join("wrong.json"))), catalog.len());
        Quiz::new(
            catalog,
            answers,
            Arc::new(fetcher),
            ContentExtractor::default(),
            Box::new(StdRng::seed_from_u64(11)),
            5,
        )
    }

    #[tokio::test]
    async fn test_fresh_state_then_correct() {
        let dir = tempfile::tempdir().unwrap();
        let quiz = quiz(&dir, &[POETS_URL], StubFetcher::new(&[]));

        let status = quiz.status().await;
        assert_eq!((status.correct, status.total), (0, 1));
        assert_eq!(status.entries, vec![EntryStatus { index: 0, correct: false }]);

        assert_eq!(quiz.mark_correct(0).await.unwrap(), Next::Complete);

        let status = quiz.status().await;
        assert_eq!((status.correct, status.total), (1, 1));
        assert_eq!(std::fs::read_to_string(dir.path().join("wrong.json")).unwrap(), "[]");
    }

    #[tokio::test]
    async fn test_mark_wrong_points_at_unanswered() {
        let dir = tempfile::tempdir().unwrap();
        let quiz = quiz(&dir, &[POETS_URL, POETS_URL, POETS_URL], StubFetcher::new(&[]));

        quiz.mark_correct(0).await.unwrap();
        quiz.mark_correct(1).await.unwrap();
        assert_eq!(quiz.mark_correct(2).await.unwrap(), Next::Complete);

        assert_eq!(quiz.mark_wrong(1).await.unwrap(), Next::Poem(1));
        assert_eq!(quiz.status().await.correct, 2);
    }

    #[tokio::test]
    async fn test_mark_out_of_range() {
        let dir = tempfile::tempdir().unwrap();
        let quiz = quiz(&dir, &[POETS_URL], StubFetcher::new(&[]));
        assert!(matches!(quiz.mark_wrong(3).await, Err(Error::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_question_builds_excerpt() {
        let dir = tempfile::tempdir().unwrap();
        let quiz = quiz(&dir, &[POETS_URL], StubFetcher::new(&[(POETS_URL, POETS_PAGE)]));

        let round = quiz.question(0).await.unwrap();
        assert_eq!(round.index, 0);
        assert_eq!(round.url, POETS_URL);
        assert_eq!(round.content.title, "Mending Wall");
        assert_eq!(round.content.author, "Robert Frost");

        let lines: Vec<&str> = round.excerpt.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines.iter().all(|l| !l.trim().is_empty()));
        assert!(round.content.body_text.contains(lines[0]));
    }

    #[tokio::test]
    async fn test_question_out_of_range() {
        let dir = tempfile::tempdir().unwrap();
        let quiz = quiz(&dir, &[POETS_URL], StubFetcher::new(&[]));
        assert!(matches!(quiz.question(1).await, Err(Error::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_question_fetch_failure() {
        let dir = tempfile::tempdir().unwrap();
        let quiz = quiz(&dir, &[POETS_URL], StubFetcher::new(&[]));
        assert!(matches!(quiz.question(0).await, Err(Error::HttpError(_))));
    }

    #[tokio::test]
    async fn test_question_unknown_source() {
        let dir = tempfile::tempdir().unwrap();
        let url = "https://www.example.com/poem";
        let quiz = quiz(&dir, &[url], StubFetcher::new(&[(url, "<pre>x</pre>")]));
        assert!(matches!(quiz.question(0).await, Err(Error::UnknownSource(_))));
    }

    #[tokio::test]
    async fn test_question_with_empty_body_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let quiz = quiz(&dir, &[POETS_URL], StubFetcher::new(&[(POETS_URL, "<title>Blank</title><pre></pre>")]));

        let round = quiz.question(0).await.unwrap();
        assert_eq!(round.excerpt, "");
    }

    #[tokio::test]
    async fn test_random_index_in_range() {
        let dir = tempfile::tempdir().unwrap();
        let quiz = quiz(&dir, &[POETS_URL, POETS_URL, POETS_URL], StubFetcher::new(&[]));
        for _ in 0..50 {
            assert!(quiz.random_index() < 3);
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_answers_are_all_kept() {
        let dir = tempfile::tempdir().unwrap();
        let urls = vec![POETS_URL; 40];
        let quiz = Arc::new(quiz(&dir, &urls, StubFetcher::new(&[])));

        for index in 0..40 {
            quiz.mark_correct(index).await.unwrap();
        }

        let tasks: Vec<_> = (0..40)
            .map(|index| {
                let quiz = Arc::clone(&quiz);
                tokio::spawn(async move {
                    if index % 2 == 0 {
                        quiz.mark_wrong(index).await.map(|_| ())
                    } else {
                        quiz.mark_correct(index).await.map(|_| ())
                    }
                })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        let expected: Vec<usize> = (0..40).step_by(2).collect();

        let status = quiz.status().await;
        assert_eq!(status.correct, 20);
        let wrong: Vec<usize> = status.entries.iter().filter(|e| !e.correct).map(|e| e.index).collect();
        assert_eq!(wrong, expected);

        let persisted: Vec<usize> =
            serde_json::from_str(&std::fs::read_to_string(dir.path().join("wrong.json")).unwrap()).unwrap();
        assert_eq!(persisted, expected);
    }

    #[tokio::test]
    async fn test_state_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        {
            let quiz = quiz(&dir, &[POETS_URL, POETS_URL], StubFetcher::new(&[]));
            quiz.mark_correct(1).await.unwrap();
        }

        let quiz = quiz(&dir, &[POETS_URL, POETS_URL], StubFetcher::new(&[]));
        let status = quiz.status().await;
        assert_eq!(status.correct, 1);
        assert_eq!(status.entries[1], EntryStatus { index: 1, correct: true });
    }
}
