//! Sample inputs shown on first start

/// Template loaded into the editor at startup
pub const DEFAULT_TEMPLATE: &str = r#"<h2>Service agreement</h2>

<p>Between {{ customer.name }}, registered in {{ customer.city }},
{{ customer.address }} (the “Customer”)</p>
<p>and {{ supplier.name }}, registered in {{ supplier.city }},
{{ supplier.address }} (the “Supplier”).</p>

<h3>Scheduled visits</h3>
<ul>
{% for i in range(1, 5) %}
    <li>Visit {{ i }} at {{ customer.name }} — café opening hours</li>
{% endfor %}
</ul>
"#;

/// Context JSON loaded into the context editor at startup
pub const DEFAULT_CONTEXT: &str = r#"{
  "customer": {
    "name": "ACME Ltd.",
    "city": "Milano",
    "address": "Via Roma 1",
    "vat_number": "01234567890"
  },
  "supplier": {
    "name": "Maintenance Co.",
    "city": "Torino",
    "address": "Via Milano 2",
    "vat_number": "09876543210"
  }
}"#;
