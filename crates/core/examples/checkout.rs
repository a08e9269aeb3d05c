//! Walks a cart through pricing, redemption clamping and points earning,
//! then prints the receipt.

use rust_decimal::Decimal;
use shinwari::{
    loyalty::LoyaltyPolicy,
    pricing::{CartLine, PricingError, ProductPricing, cart_total},
    receipt::{Receipt, ReceiptLine},
};

fn main() -> Result<(), PricingError> {
    let policy = LoyaltyPolicy::default();

    let karahi = ProductPricing::discounted(Decimal::new(50000, 2), Decimal::new(45000, 2));
    let pulao = ProductPricing::new(Decimal::new(11000, 2));

    let karahi_line = CartLine::new(karahi, 3);
    let pulao_line = CartLine::new(pulao, 2);

    let subtotal = cart_total(&[karahi_line, pulao_line])?;
    let (points_redeemed, discount) = policy.clamp_redemption(80, subtotal);
    let payable = subtotal - discount;

    let receipt = Receipt {
        lines: vec![
            ReceiptLine {
                name: "Chicken Karahi".to_string(),
                quantity: karahi_line.quantity,
                unit_price: karahi.effective_price(),
                total: karahi_line.total()?,
            },
            ReceiptLine {
                name: "Kabuli Pulao".to_string(),
                quantity: pulao_line.quantity,
                unit_price: pulao.effective_price(),
                total: pulao_line.total()?,
            },
        ],
        subtotal,
        discount,
        payable,
        points_redeemed,
        points_earned: policy.points_for_amount(payable),
    };

    println!("{receipt}");

    Ok(())
}
