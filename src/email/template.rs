//! Order confirmation email

use std::fmt::Write;

use crate::models::Order;

const LOGO_URL: &str = "https://customer-assets.emergentagent.com/job_mooki-single-vape/artifacts/yq4n0bz1_logo.jpg";
const CELL: &str = "padding: 8px; border-bottom: 1px solid #262626;";

pub fn order_confirmation_subject(order: &Order) -> String {
    format!("MOOKI STORE - Order Confirmation #{}", order.short_id())
}

/// Customer-supplied fields are HTML-escaped.
pub fn order_confirmation(order: &Order) -> String {
    let mut rows = String::new();
    for item in &order.items {
        let _ = write!(
            rows,
            "<tr><td style='{CELL}'>{}</td><td style='{CELL}'>{}</td><td style='{CELL}'>${}</td></tr>",
            escape(&item.product_name),
            item.quantity,
            item.price,
        );
    }

    format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto; background: #0A0A0A; color: #EDEDED; padding: 20px;">
  <div style="text-align: center; margin-bottom: 20px;">
    <img src="{LOGO_URL}" alt="MOOKI STORE" style="width: 80px; height: 80px; border-radius: 8px;">
    <h1 style="color: #FF4500; margin: 10px 0;">MOOKI STORE</h1>
  </div>
  <h2 style="color: #FF4500;">Order Confirmation</h2>
  <p>Thank you for your order, {name}!</p>
  <p><strong>Order ID:</strong> {id}</p>
  <p><strong>Payment Method:</strong> {payment}</p>
  <table style="width: 100%; border-collapse: collapse; margin: 20px 0;">
    <thead>
      <tr style="background: #121212;">
        <th style="padding: 8px; text-align: left;">Product</th>
        <th style="padding: 8px; text-align: left;">Qty</th>
        <th style="padding: 8px; text-align: left;">Price</th>
      </tr>
    </thead>
    <tbody>{rows}</tbody>
  </table>
  <p style="font-size: 18px;"><strong>Total: <span style="color: #FF4500;">${total}</span></strong></p>
  <div style="background: #121212; padding: 15px; border-radius: 8px; margin-top: 20px;">
    <h3 style="margin-top: 0;">Delivery Address</h3>
    <p>{address}</p>
    <p>Phone: {phone}</p>
  </div>
  <p style="color: #A1A1AA; font-size: 12px; margin-top: 20px;">This product is intended for adults 18+ only.</p>
</div>"#,
        name = escape(&order.customer_name),
        id = order.id,
        payment = escape(&order.payment_method),
        total = order.total,
        address = escape(&order.address),
        phone = escape(&order.phone),
    )
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
