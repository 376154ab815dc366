use criterion::{Criterion, criterion_group, criterion_main};
use rexp::{Rexp, any_of, digit, re};

fn date_rexp() -> Rexp {
    let delim = any_of(&["- /."]).expect("Invalid delimiter class");
    let century_prefix = re("19") | re("20");
    let under_ten = re("0") + any_of(&["1-9"]).expect("Invalid class");
    let ten_to_twelve = re("1") + any_of(&["012"]).expect("Invalid class");
    let ten_and_under_thirty =
        any_of(&["12"]).expect("Invalid class") + any_of(&["0-9"]).expect("Invalid class");
    let thirties = re("3") + any_of(&["01"]).expect("Invalid class");

    let year = century_prefix + digit().repeat(2).expect("Invalid repeat");
    let month = &under_ten | &ten_to_twelve;
    let day = under_ten | ten_and_under_thirty | thirties;

    (year.capture("year") + &delim + month.capture("month") + &delim + day.capture("day")).all()
}

fn building_benchmark(c: &mut Criterion) {
    c.bench_function("build date expression", |b| {
        b.iter(|| std::hint::black_box(date_rexp()))
    });
}

fn matching_benchmark(c: &mut Criterion) {
    let date = date_rexp();
    let raw = date.compile().expect("Failed to compile date expression");

    c.bench_function("match with rexp", |b| {
        b.iter(|| {
            let m = date.find("2009/12/28").expect("Failed to match");
            std::hint::black_box(m.map(|m| m.get("day").is_some()));
        })
    });

    c.bench_function("match with compiled regex", |b| {
        b.iter(|| std::hint::black_box(raw.captures("2009/12/28").is_some()))
    });
}

criterion_group!(benches, building_benchmark, matching_benchmark);
criterion_main!(benches);
