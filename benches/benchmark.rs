use std::sync::Arc;

use book_recommender::{
    Book, BookRecommender, CompositeSimilarity, GenresOverlapSimilarity, SimilarityCalculator,
    TextTokenizer, TfIdfSimilarity,
};
use criterion::{criterion_group, criterion_main, Criterion};

const WORDS: &[&str] = &[
    "dragon", "castle", "space", "ship", "love", "war", "detective", "murder", "journey", "island",
    "magic", "kingdom", "robot", "future", "history", "family", "secret", "ocean", "mountain", "city",
];
const GENRES: &[&str] = &["Fantasy", "Science Fiction", "Romance", "Mystery", "History", "Adventure"];

// Deterministic synthetic collection so runs are comparable.
fn synthetic_books(n: usize) -> Vec<Book> {
    (0..n)
        .map(|i| {
            let description = (0..40)
                .map(|j| WORDS[(i * 7 + j * 13) % WORDS.len()])
                .collect::<Vec<_>>()
                .join(" ");
            Book {
                id: format!("book-{i}"),
                title: format!("Title {i}"),
                author: format!("Author {}", i % 50),
                description,
                genres: vec![
                    GENRES[i % GENRES.len()].to_string(),
                    GENRES[(i / 3) % GENRES.len()].to_string(),
                ],
                rating: 3.0 + (i % 20) as f64 / 10.0,
                rating_count: (i * 31 % 10_000) as u32,
                url: format!("https://example.org/book/{i}"),
            }
        })
        .collect()
}

fn recommend_benchmark(c: &mut Criterion) {
    let books = synthetic_books(2_000);
    let tokenizer = TextTokenizer::new(["the", "and", "a", "of"]);

    c.bench_function("build_tfidf_corpus", |b| {
        b.iter(|| TfIdfSimilarity::new(books.iter().cloned(), tokenizer.clone()))
    });

    let descriptions = TfIdfSimilarity::new(books.iter().cloned(), tokenizer.clone())
        .expect("synthetic collection is not empty");
    let composite = CompositeSimilarity::new([
        (Arc::new(descriptions) as Arc<dyn SimilarityCalculator>, 0.5),
        (Arc::new(GenresOverlapSimilarity::new()) as Arc<dyn SimilarityCalculator>, 0.5),
    ])
    .expect("weights are valid");
    let recommender = BookRecommender::new(books.iter().cloned(), Arc::new(composite))
        .expect("synthetic collection is not empty");
    let origin = books[0].clone();

    c.bench_function("recommend_top_10", |b| {
        b.iter(|| recommender.recommend_books(&origin, 10))
    });
}

criterion_group!(benches, recommend_benchmark);
criterion_main!(benches);
