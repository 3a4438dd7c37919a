use std::process::Command;

fn run(catalog: &str, script: &str) -> (String, String, Option<i32>) {
    let output = Command::new(env!("CARGO_BIN_EXE_storefront"))
        .arg(format!("tests/fixtures/{catalog}"))
        .arg(format!("tests/fixtures/{script}"))
        .env("RUST_LOG", "warn")
        .output()
        .expect("failed to run binary");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.code())
}

const SESSION_CART: &str = "\
id,name,price,quantity,total
1,Wireless Headphones,1000.0000,2,2000.0000
2,Cotton T-Shirt,4500.0000,2,9000.0000

items,subtotal,discount,total,coupon
4,11000.0000,1452.0000,9548.0000,powerlabsx
";

#[test]
fn session_with_stock_limit_and_coupon() {
    let (stdout, stderr, code) = run("catalog.json", "session.csv");

    assert_eq!(code, Some(0));
    assert_eq!(stdout, SESSION_CART);

    let notifications: Vec<&str> = stderr.lines().collect();
    assert_eq!(
        notifications,
        vec![
            "success: Wireless Headphones added to cart",
            "success: Wireless Headphones added to cart",
            "error: Maximum stock limit reached",
            "success: Cotton T-Shirt added to cart",
            "error: Invalid coupon code",
            "success: Coupon applied successfully! 13.2% discount added",
            "error: Coupon already applied",
        ]
    );
}

#[test]
fn csv_catalog_matches_json_catalog() {
    let (stdout, _, code) = run("catalog.csv", "session.csv");

    assert_eq!(code, Some(0));
    assert_eq!(stdout, SESSION_CART);
}

#[test]
fn errors_notify_but_do_not_block() {
    let (stdout, stderr, code) = run("catalog.json", "with_errors.csv");

    assert_eq!(code, Some(0));
    assert!(stderr.contains("unrecognized action 'checkout'"));
    assert!(stderr.contains("add missing product"));
    assert!(stderr.contains("error: Cannot exceed available stock"));
    assert!(stderr.contains("error: Please enter a coupon code"));
    // removing a product that is not in the cart still reports success
    assert!(stderr.contains("success: Item removed from cart"));

    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], "id,name,price,quantity,total");
    assert_eq!(lines[1], "3,Coffee Maker,3500.0000,1,3500.0000");
    assert_eq!(lines[4], "1,3500.0000,0.0000,3500.0000,");
}

#[test]
fn removed_coupon_leaves_no_discount() {
    let (stdout, stderr, code) = run("catalog.json", "remove_coupon.csv");

    assert_eq!(code, Some(0));
    assert!(stderr.contains("success: Coupon removed"));

    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], "id,name,price,quantity,total");
    assert_eq!(lines[1], "");
    assert_eq!(lines[3], "0,0.0000,0.0000,0.0000,");
}

#[test]
fn padded_coupon_code_is_not_trimmed() {
    let (stdout, stderr, code) = run("catalog.json", "padded_coupon.csv");

    assert_eq!(code, Some(0));
    assert!(stderr.contains("error: Invalid coupon code"));
    assert!(!stderr.contains("Coupon applied"));

    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[4], "1,4500.0000,0.0000,4500.0000,");
}

#[test]
fn oversized_catalog_price_fails() {
    let (stdout, stderr, code) = run("oversized_catalog.json", "session.csv");

    assert_eq!(code, Some(1));
    assert!(stdout.is_empty());
    assert!(stderr.contains("invalid catalog json"));
}

#[test]
fn missing_arguments_print_usage() {
    let output = Command::new(env!("CARGO_BIN_EXE_storefront"))
        .output()
        .expect("failed to run binary");

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("usage"));
}

#[test]
fn unreadable_catalog_fails() {
    let (stdout, stderr, code) = run("missing.json", "session.csv");

    assert_eq!(code, Some(1));
    assert!(stdout.is_empty());
    assert!(stderr.contains("failed to open catalog"));
}
