//! Benchmarks for editor commands performance
//!
//! Measures the clone-edit-normalize cycle on documents of realistic song
//! sizes, plus the session overhead of history and selection upkeep.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use kara_core::{normalize, SequentialIdGenerator};
use kara_editor::{
    AlignmentDocument, EditorCommand, EditorSession, EntityId, Line, PasteLinesCommand,
    ShiftAlignmentCommand, ShiftLinesCommand, SplitLineCommand, Subword, Word,
};

/// A song of `lines` lines, six two-syllable words each
fn generate_song(lines: usize) -> AlignmentDocument {
    let mut time = 0.0;
    let built = (0..lines)
        .map(|li| {
            let line_id = EntityId::new(format!("l{li}"));
            let words = (0..6)
                .map(|wi| {
                    let word_id = EntityId::new(format!("l{li}w{wi}"));
                    let subwords = (0..2)
                        .map(|si| {
                            let subword = Subword::new(
                                format!("l{li}w{wi}s{si}").into(),
                                word_id.clone(),
                                line_id.clone(),
                                time,
                                time + 0.25,
                                "na",
                            );
                            time += 0.25;
                            subword
                        })
                        .collect();
                    Word::new(word_id, line_id.clone(), subwords)
                })
                .collect();
            time += 1.0;
            Line::new(line_id, words)
        })
        .collect();
    normalize(AlignmentDocument::from_lines(built))
}

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");
    for size in [20, 80, 320] {
        let doc = generate_song(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &doc, |b, doc| {
            b.iter(|| normalize(black_box(doc.clone())));
        });
    }
    group.finish();
}

fn bench_commands(c: &mut Criterion) {
    let mut group = c.benchmark_group("commands");
    for size in [20, 80, 320] {
        let doc = generate_song(size);
        let middle = EntityId::new(format!("l{}", size / 2));

        group.bench_with_input(BenchmarkId::new("shift_line", size), &doc, |b, doc| {
            let command = ShiftLinesCommand::new(vec![middle.clone()], 0.5);
            let mut ids = SequentialIdGenerator::new("b");
            b.iter(|| command.execute(black_box(doc), &mut ids));
        });

        group.bench_with_input(BenchmarkId::new("shift_alignment", size), &doc, |b, doc| {
            let command = ShiftAlignmentCommand::new(2.0);
            let mut ids = SequentialIdGenerator::new("b");
            b.iter(|| command.execute(black_box(doc), &mut ids));
        });

        group.bench_with_input(BenchmarkId::new("split_line", size), &doc, |b, doc| {
            let command = SplitLineCommand::new(format!("l{}w3", size / 2).into());
            let mut ids = SequentialIdGenerator::new("b");
            b.iter(|| command.execute(black_box(doc), &mut ids));
        });

        group.bench_with_input(BenchmarkId::new("paste_ten_lines", size), &doc, |b, doc| {
            let sources = (0..10).map(|i| EntityId::new(format!("l{i}"))).collect();
            let command = PasteLinesCommand::new(1_000.0, sources, false);
            let mut ids = SequentialIdGenerator::new("b");
            b.iter(|| command.execute(black_box(doc), &mut ids));
        });
    }
    group.finish();
}

fn bench_session(c: &mut Criterion) {
    let mut group = c.benchmark_group("session");

    group.bench_function("edit_then_undo", |b| {
        let mut session = EditorSession::from_document(generate_song(80))
            .with_id_generator(Box::new(SequentialIdGenerator::new("b")));
        let line = EntityId::from("l40");
        b.iter(|| {
            session.shift_lines(black_box(&[line.clone()]), 0.1).ok();
            session.undo();
        });
    });

    group.bench_function("add_words_with_history", |b| {
        b.iter(|| {
            let mut session = EditorSession::new()
                .with_id_generator(Box::new(SequentialIdGenerator::new("b")));
            session.add_line(0.0, 0.5, "first").ok();
            for i in 1..50 {
                let time = f64::from(i) * 0.1;
                session.add_word_at(black_box(time), "more").ok();
            }
            black_box(session.stats())
        });
    });

    group.finish();
}

criterion_group!(benches, bench_normalize, bench_commands, bench_session);
criterion_main!(benches);
