use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use storefront::{Action, Amount, Catalog, Product, ProductId, Storefront};

fn catalog(size: ProductId, stock: u32) -> Catalog {
    let products = (1..=size)
        .map(|id| Product {
            id,
            name: format!("Product {id}"),
            description: String::new(),
            price: Amount::from_float(100.0 + id as f64),
            category: format!("Category {}", id % 8),
            image: String::new(),
            stock,
        })
        .collect();
    Catalog::new(products).expect("generated catalog is valid")
}

/// Generates a shopping session.
///
/// Pattern per product (repeating):
/// 1. Add
/// 2. Add
/// 3. Update quantity to 1
///
/// with a coupon applied at the start so every mutation recomputes the discount.
pub struct ActionGenerator {
    products: ProductId,
    remaining: u32,
    step: u32,
    coupon_sent: bool,
}

impl ActionGenerator {
    pub fn new(products: ProductId, actions: u32) -> Self {
        Self {
            products,
            remaining: actions,
            step: 0,
            coupon_sent: false,
        }
    }
}

impl Iterator for ActionGenerator {
    type Item = Action;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.coupon_sent {
            self.coupon_sent = true;
            return Some(Action::ApplyCoupon {
                code: "POWERLABSx".to_string(),
            });
        }
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let product = (self.step / 3) % self.products + 1;
        let action = match self.step % 3 {
            0 | 1 => Action::AddItem { product },
            _ => Action::UpdateQuantity {
                product,
                quantity: 1,
            },
        };
        self.step += 1;
        Some(action)
    }
}

fn bench_session(c: &mut Criterion) {
    let mut group = c.benchmark_group("session");

    for products in [10u32, 100, 1_000] {
        let catalog = catalog(products, 5);
        group.bench_with_input(
            BenchmarkId::from_parameter(products),
            &catalog,
            |b, catalog| {
                b.iter(|| {
                    let mut store = Storefront::new(catalog.clone());
                    for action in ActionGenerator::new(products, 10_000) {
                        let _ = black_box(store.apply(action));
                    }
                    store
                });
            },
        );
    }

    group.finish();
}

fn bench_filter(c: &mut Criterion) {
    let catalog = catalog(10_000, 1);
    c.bench_function("filter_by_category_10k", |b| {
        b.iter(|| black_box(catalog.filter_by_category("Category 3").count()));
    });
}

criterion_group!(benches, bench_session, bench_filter);
criterion_main!(benches);
