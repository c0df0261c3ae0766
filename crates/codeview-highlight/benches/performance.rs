use codeview_core::EditEvent;
use codeview_highlight::CodeHighlighter;
use codeview_lang::LanguageConfiguration;
use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use rand::{Rng, SeedableRng, rngs::StdRng};

fn large_source(line_count: usize) -> String {
    let mut out = String::with_capacity(line_count * 64);
    for i in 0..line_count {
        match i % 4 {
            0 => out.push_str(&format!("func f{i}(a: Int) -> Int {{ // line {i}\n")),
            1 => out.push_str("    let s = \"string with (parens)\" /* note */\n"),
            2 => out.push_str("    return a * 0x2A + [1, 2][0]\n"),
            _ => out.push_str("}\n"),
        }
    }
    out
}

fn bench_large_file_load(c: &mut Criterion) {
    let text = large_source(50_000);
    c.bench_function("large_file_load/50k_lines", |b| {
        b.iter(|| {
            let highlighter =
                CodeHighlighter::new(LanguageConfiguration::swift(), black_box(&text));
            black_box(highlighter.line_index().line_count());
        })
    });
}

fn bench_typing_in_middle(c: &mut Criterion) {
    let text = large_source(50_000);
    c.bench_function("typing_middle/100_inserts", |b| {
        b.iter_batched(
            || {
                (
                    text.clone(),
                    CodeHighlighter::new(LanguageConfiguration::swift(), &text),
                )
            },
            |(mut text, mut highlighter)| {
                let mut offset = text.len() / 2;
                while !text.is_char_boundary(offset) {
                    offset += 1;
                }
                for _ in 0..100 {
                    if let Some(event) = EditEvent::apply(&mut text, offset..offset, "x") {
                        black_box(highlighter.text_did_change(&text, event));
                    }
                    offset += 1;
                }
            },
            BatchSize::LargeInput,
        )
    });
}

fn bench_comment_opener_convergence(c: &mut Criterion) {
    let text = large_source(10_000);
    c.bench_function("comment_toggle/10k_lines", |b| {
        b.iter_batched(
            || {
                (
                    text.clone(),
                    CodeHighlighter::new(LanguageConfiguration::swift(), &text),
                )
            },
            |(mut text, mut highlighter)| {
                // Opening a comment at the top re-lexes the whole document; closing it again
                // converges just as far.
                if let Some(event) = EditEvent::apply(&mut text, 0..0, "/*") {
                    black_box(highlighter.text_did_change(&text, event));
                }
                if let Some(event) = EditEvent::apply(&mut text, 0..2, "") {
                    black_box(highlighter.text_did_change(&text, event));
                }
            },
            BatchSize::LargeInput,
        )
    });
}

fn bench_random_edits(c: &mut Criterion) {
    let text = large_source(20_000);
    c.bench_function("random_edits/200", |b| {
        b.iter_batched(
            || {
                (
                    text.clone(),
                    CodeHighlighter::new(LanguageConfiguration::swift(), &text),
                    StdRng::seed_from_u64(7),
                )
            },
            |(mut text, mut highlighter, mut rng)| {
                for _ in 0..200 {
                    let insert = ["{", "}", "\n", "/*", "*/", "a"][rng.gen_range(0..6)];
                    let start = rng.gen_range(0..=text.len());
                    let end = (start + rng.gen_range(0..3)).min(text.len());
                    if let Some(event) = EditEvent::apply(&mut text, start..end, insert) {
                        black_box(highlighter.text_did_change(&text, event));
                    }
                }
            },
            BatchSize::LargeInput,
        )
    });
}

criterion_group!(
    benches,
    bench_large_file_load,
    bench_typing_in_middle,
    bench_comment_opener_convergence,
    bench_random_edits
);
criterion_main!(benches);
