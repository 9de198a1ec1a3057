use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use splp_validator::protocol::grammar::{is_base64_reply, is_data_reply, is_version_reply};
use splp_validator::{validate, Command, Message, SessionState, Validator};

fn bench_grammar(c: &mut Criterion) {
    let mut group = c.benchmark_group("grammar");
    let b64 = format!("B64: {}==", "QUJD".repeat(255) + "QU");
    let data = format!("GET_FILE {} GET_FILE", "a.b0".repeat(256));

    group.bench_function("version", |b| {
        b.iter(|| is_version_reply(std::hint::black_box("VERSION 1234567890")))
    });
    group.bench_function("data_1k", |b| {
        b.iter(|| is_data_reply(std::hint::black_box(&data), Command::GetFile))
    });
    group.bench_function("base64_1k", |b| {
        b.iter(|| is_base64_reply(std::hint::black_box(&b64)))
    });

    group.finish();
}

fn bench_session(c: &mut Criterion) {
    let mut group = c.benchmark_group("session");
    let messages = vec![
        Message::client("CONNECT"),
        Message::server("CONNECT_OK"),
        Message::client("GET_VER"),
        Message::server("VERSION 2"),
        Message::client("GET_DATA"),
        Message::server("GET_DATA payload.1 GET_DATA"),
        Message::client("GET_B64"),
        Message::server("B64: SGVsbG8="),
        Message::client("DISCONNECT"),
        Message::server("DISCONNECT_OK"),
    ];

    group.bench_function("pure_validate", |b| {
        b.iter(|| {
            let mut session = SessionState::new();
            for msg in &messages {
                let (_, next) = validate(session, msg);
                session = next;
            }
            session
        })
    });

    group.bench_function("validator", |b| {
        b.iter_batched(
            Validator::new,
            |mut validator| {
                for msg in &messages {
                    let _ = validator.validate(msg);
                }
                validator
            },
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

criterion_group!(benches, bench_grammar, bench_session);
criterion_main!(benches);
