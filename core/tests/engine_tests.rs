use irs_core::{Bm25, IrConfig, IrError, IrSystem, Scoring, Stopwords, TermFrequency};

fn tf_system(docs: &[&str]) -> IrSystem {
    let mut sys = IrSystem::default();
    for (i, text) in docs.iter().enumerate() {
        sys.index_document(text, &format!("doc{i}")).unwrap();
    }
    sys
}

fn bm25_system(docs: &[&str]) -> IrSystem {
    let mut sys = IrSystem::new(Stopwords::default(), Box::new(Bm25));
    for (i, text) in docs.iter().enumerate() {
        sys.index_document(text, &format!("doc{i}")).unwrap();
    }
    sys
}

#[test]
fn raw_counts_for_single_document() {
    let mut sys = IrSystem::default();
    sys.index_document("hello hello world\n", "d1").unwrap();
    assert_eq!(sys.query("hello", 10), vec![(2.0, 0)]);
    assert_eq!(sys.query("world", 10), vec![(1.0, 0)]);
    assert!(sys.query("missing", 10).is_empty());
    assert_eq!(sys.document(0).unwrap().url, "d1");
}

#[test]
fn higher_count_ranks_first() {
    let sys = tf_system(&["Title1\nthe cat sat", "Title2\ncat cat dog"]);
    assert_eq!(sys.query("cat", 10), vec![(2.0, 1), (1.0, 0)]);
    assert_eq!(sys.document(0).unwrap().title, "Title1");
    assert_eq!(sys.document(1).unwrap().word_count, 4);
}

#[test]
fn ties_rank_higher_doc_id_first() {
    let sys = tf_system(&["a\nfox", "b\nfox", "c\nfox"]);
    assert_eq!(sys.query("fox", 2), vec![(1.0, 2), (1.0, 1)]);
}

#[test]
fn scores_sum_over_query_terms_including_repeats() {
    let sys = tf_system(&["Title1\nthe cat sat", "Title2\ncat cat dog"]);
    assert_eq!(sys.query("cat sat", 10), vec![(2.0, 1), (2.0, 0)]);
    assert_eq!(sys.query("cat cat", 10), vec![(4.0, 1), (2.0, 0)]);
    assert_eq!(sys.query("dog unknownword", 10), vec![(1.0, 1)]);
}

#[test]
fn stopword_only_query_is_empty() {
    let sys = tf_system(&["t\nthe cat"]);
    assert!(sys.query("the a of", 10).is_empty());
    assert!(sys.query("", 10).is_empty());
    assert!(sys.query("?!", 10).is_empty());
    assert_eq!(sys.query_with_total("the", 10), (vec![], 0));
}

#[test]
fn consultant_ignores_question_words() {
    let mut sys = IrSystem::consultant(Scoring::TermFrequency);
    sys.index_document("GZIP\nhow to compress files", "gzip.txt").unwrap();
    sys.index_document("LS\nlist files in a directory", "ls.txt").unwrap();
    assert_eq!(sys.query_terms("How do I compress files?"), vec!["compress", "files"]);
    assert_eq!(sys.query("how do i compress", 10), vec![(1.0, 0)]);
    assert!(sys.query("how do i", 10).is_empty());
}

#[test]
fn result_count_is_bounded() {
    let docs: Vec<String> = (0..30).map(|i| format!("t{i}\nshared word{i}")).collect();
    let mut sys = IrSystem::default();
    sys.index_collection(docs.iter().enumerate().map(|(i, d)| (d.clone(), format!("{i}.txt")))).unwrap();
    assert_eq!(sys.query("shared", 10).len(), 10);
    assert_eq!(sys.query("shared", 100).len(), 30);
    assert!(sys.query("shared", 0).is_empty());
    let (hits, total) = sys.query_with_total("shared word3", 5);
    assert_eq!(total, 30);
    assert_eq!(hits[0], (2.0, 3));
    for (_, doc) in sys.query("shared", 100) {
        assert!((doc as usize) < sys.len());
    }
}

#[test]
fn ids_are_assigned_in_order_without_gaps() {
    let sys = tf_system(&["a\nx", "b\nx", "c\ny", "a\nx"]);
    assert_eq!(sys.len(), 4);
    let titles: Vec<&str> = sys.documents().iter().map(|d| d.title.as_str()).collect();
    assert_eq!(titles, vec!["a", "b", "c", "a"]);
    // the same text twice is two documents
    assert_eq!(sys.index().doc_freq("x"), 3);
}

#[test]
fn malformed_document_changes_nothing() {
    let mut sys = tf_system(&["ok\nfirst"]);
    let err = sys.index_document("no newline", "bad.txt").unwrap_err();
    assert_eq!(err, IrError::MalformedDocument { url: "bad.txt".into() });
    assert_eq!(sys.len(), 1);
    assert!(!sys.index().contains_term("newline"));
    assert_eq!(sys.index().avg_doc_len(), 2.0);
}

#[test]
fn collection_stops_at_first_malformed_document() {
    let mut sys = IrSystem::default();
    let err = sys.index_collection(vec![("a\nx", "1"), ("broken", "2"), ("c\ny", "3")]).unwrap_err();
    assert_eq!(err, IrError::MalformedDocument { url: "2".into() });
    assert_eq!(sys.len(), 1);
}

#[test]
fn parallel_collection_matches_sequential() {
    let docs: Vec<(String, String)> = (0..200)
        .map(|i| (format!("Title {i}\nterm{} term{} common the", i % 7, i % 13), format!("{i}.txt")))
        .collect();
    let mut seq = IrSystem::new(Stopwords::default(), Box::new(Bm25));
    seq.index_collection(docs.iter().map(|(t, u)| (t.as_str(), u.as_str()))).unwrap();
    let mut par = IrSystem::new(Stopwords::default(), Box::new(Bm25));
    par.index_collection_parallel(&docs).unwrap();

    assert_eq!(seq.documents(), par.documents());
    assert_eq!(seq.index().avg_doc_len(), par.index().avg_doc_len());
    for q in ["term3", "term5 term11", "common", "title 42"] {
        assert_eq!(seq.query(q, 20), par.query(q, 20));
    }
}

#[test]
fn parallel_collection_is_all_or_nothing() {
    let mut sys = IrSystem::default();
    let docs = vec![("a\nx".to_string(), "1".to_string()), ("broken".to_string(), "2".to_string())];
    assert!(sys.index_collection_parallel(&docs).is_err());
    assert!(sys.is_empty());
    assert_eq!(sys.index().num_terms(), 0);
}

#[test]
fn parallel_collection_reports_first_malformed_document() {
    let mut docs: Vec<(String, String)> = (0..500).map(|i| (format!("t{i}\nbody"), format!("{i}.txt"))).collect();
    docs[17].0 = "no title 17".into();
    docs[400].0 = "no title 400".into();
    for _ in 0..20 {
        let mut sys = IrSystem::default();
        let err = sys.index_collection_parallel(&docs).unwrap_err();
        assert_eq!(err, IrError::MalformedDocument { url: "17.txt".into() });
        assert!(sys.is_empty());
    }
}

#[test]
fn lenient_total_score_skips_unknown_terms() {
    let sys = tf_system(&["t\ncat cat"]);
    assert_eq!(sys.total_score(&["cat", "unicorn"], 0), 2.0);
    assert_eq!(sys.score("cat", 0), 2.0);
    assert_eq!(sys.score("unicorn", 0), 0.0);
}

#[test]
fn strict_total_score_rejects_unknown_terms() {
    let sys = tf_system(&["t\ncat cat"]);
    assert_eq!(sys.total_score_strict(&["cat"], 0), Ok(2.0));
    assert_eq!(
        sys.total_score_strict(&["cat", "unicorn"], 0),
        Err(IrError::UnknownTerm { term: "unicorn".into() })
    );
}

#[test]
fn bm25_unknown_terms_score_zero_everywhere() {
    let sys = bm25_system(&["a\nrust go", "b\ngo java"]);
    assert!(sys.query("unicorn dragon", 10).is_empty());
    for doc in 0..2 {
        assert_eq!(sys.total_score(&["unicorn", "dragon"], doc), 0.0);
    }
}

#[test]
fn bm25_prefers_rare_terms_and_higher_tf() {
    let sys = bm25_system(&[
        "t\nrust rust memory",
        "t\nrust go memory",
        "t\npython go scripts",
        "t\njava go beans",
        "t\nhaskell go monads",
    ]);
    let hits = sys.query("rust", 10);
    assert_eq!(hits.iter().map(|h| h.1).collect::<Vec<_>>(), vec![0, 1]);
    assert!(hits[0].0 > hits[1].0);
    assert!(hits[1].0 > 0.0);
}

#[test]
fn bm25_scores_common_terms_below_zero() {
    let sys = bm25_system(&["t\ngo rust", "t\ngo java", "t\ngo"]);
    let hits = sys.query("go", 10);
    assert_eq!(hits.len(), 3);
    assert!(hits.iter().all(|(s, _)| *s < 0.0));
    // the shortest document has the largest tf weight, so the most negative score
    assert_eq!(hits[2].1, 2);
    assert!(hits.windows(2).all(|w| w[0].0 >= w[1].0));
}

#[test]
fn average_length_is_a_running_statistic() {
    let mut sys = bm25_system(&["t\nrust rust"]);
    let before = sys.score("rust", 0);
    sys.index_document("t\none two three four five six seven", "long").unwrap();
    // doc 0 is now shorter than average, and df/N changed too
    assert_ne!(sys.score("rust", 0), before);
    assert_eq!(sys.index().avg_doc_len(), 5.5);
}

#[test]
fn scorer_is_chosen_at_construction() {
    let tf = IrSystem::new(Stopwords::default(), Box::new(TermFrequency));
    let bm = IrSystem::with_config(&IrConfig { scoring: Scoring::Bm25, ..IrConfig::default() });
    assert_eq!(tf.scorer_name(), "tf");
    assert_eq!(bm.scorer_name(), "bm25");
    let consultant = IrSystem::consultant(Scoring::Bm25);
    assert_eq!(consultant.scorer_name(), "bm25");
    assert_eq!(consultant.stopwords(), &Stopwords::consultant());
}
