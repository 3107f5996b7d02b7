use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use folio_browser::SelectionStore;
use folio_core::RecordId;

const PAGE_SIZE: u64 = 12;

fn store_with(selected: u64) -> SelectionStore {
    let mut store = SelectionStore::new();
    let ids: Vec<RecordId> = (0..selected).map(RecordId).collect();
    store.select_page(&ids);
    store
}

fn bench_reconcile(c: &mut Criterion) {
    let mut group = c.benchmark_group("reconcile");

    for selected in [1_000u64, 100_000, 1_000_000] {
        let visible: Vec<RecordId> = (0..PAGE_SIZE).map(RecordId).collect();
        let reported: Vec<RecordId> = visible.iter().copied().step_by(2).collect();

        group.bench_with_input(
            BenchmarkId::from_parameter(selected),
            &selected,
            |b, &selected| {
                let mut store = store_with(selected);
                b.iter(|| {
                    store.reconcile(black_box(&visible), black_box(&reported));
                })
            },
        );
    }

    group.finish();
}

fn bench_select_page(c: &mut Criterion) {
    let page: Vec<RecordId> = (0..PAGE_SIZE).map(RecordId).collect();
    let mut store = store_with(100_000);

    c.bench_function("select_page", |b| {
        b.iter(|| store.select_page(black_box(&page)))
    });
}

criterion_group!(benches, bench_reconcile, bench_select_page);
criterion_main!(benches);
