use criterion::{black_box, criterion_group, criterion_main, Criterion};

use aprovatec_core::engine::{evaluate_discipline, evaluate_forms, evaluate_semester};
use aprovatec_core::model::{Discipline, DisciplineForm, GradeSlot};

fn make_discipline(i: usize, graded: usize) -> Discipline {
    let mut d = Discipline::new(&format!("Disciplina {i}"), 40.0 + (i % 3) as f64 * 20.0, (i % 7) as f64);
    for slot in GradeSlot::ALL.into_iter().take(graded) {
        d = d.with_grade(slot, 5.0 + (i % 5) as f64);
    }
    d
}

fn bench_discipline(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate_discipline");

    let complete = make_discipline(1, 4);
    let partial = make_discipline(2, 2);
    let empty = make_discipline(3, 0);

    group.bench_function("complete", |b| {
        b.iter(|| evaluate_discipline(black_box(&complete)))
    });

    group.bench_function("partial", |b| {
        b.iter(|| evaluate_discipline(black_box(&partial)))
    });

    group.bench_function("no_grades", |b| {
        b.iter(|| evaluate_discipline(black_box(&empty)))
    });

    group.finish();
}

fn bench_semester(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate_semester");

    let small: Vec<Discipline> = (0..6).map(|i| make_discipline(i, 4)).collect();
    let large: Vec<Discipline> = (0..200).map(|i| make_discipline(i, i % 5)).collect();

    let forms: Vec<DisciplineForm> = (0..6)
        .map(|i| {
            DisciplineForm::new(&format!("Disciplina {i}"), "60", "2")
                .with_grade(GradeSlot::Av1, "7.5")
                .with_grade(GradeSlot::Av2, "8")
        })
        .collect();

    group.bench_function("6_disciplines", |b| {
        b.iter(|| evaluate_semester(black_box(&small)))
    });

    group.bench_function("200_disciplines", |b| {
        b.iter(|| evaluate_semester(black_box(&large)))
    });

    group.bench_function("6_forms", |b| {
        b.iter(|| evaluate_forms(black_box(&forms)))
    });

    group.finish();
}

criterion_group!(benches, bench_discipline, bench_semester);
criterion_main!(benches);
