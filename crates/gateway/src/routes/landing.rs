use axum::response::Html;
use chrono::{SecondsFormat, Utc};

/// GET / — minimal booking form. The timestamp shows when the page was served.
pub async fn index() -> Html<String> {
    let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
    Html(PAGE.replace("{timestamp}", &timestamp))
}

const PAGE: &str = r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Seat reservations</title>
  <style>
    body { font-family: sans-serif; max-width: 36rem; margin: 2rem auto; }
    label { display: block; margin-top: .5rem; }
    pre { background: #f4f4f4; padding: .75rem; }
  </style>
</head>
<body>
  <h1>Seat reservations</h1>
  <p>Served at <time>{timestamp}</time></p>
  <form id="reserve">
    <label>User <input name="user_id" value="user-1" required></label>
    <label>Event <input name="event_id" value="concert-01" required></label>
    <label>Quantity <input name="quantity" type="number" min="1" value="1"></label>
    <label>Price <input name="price" type="number" min="0" step="0.01" value="50"></label>
    <button type="submit">Reserve</button>
  </form>
  <pre id="result"></pre>
  <script>
    document.getElementById("reserve").addEventListener("submit", async (event) => {
      event.preventDefault();
      const form = new FormData(event.target);
      const body = {
        user_id: form.get("user_id"),
        event_id: form.get("event_id"),
        quantity: Number(form.get("quantity")),
        price: Number(form.get("price")),
      };
      const response = await fetch("/api/reserve", {
        method: "POST",
        headers: { "content-type": "application/json" },
        body: JSON.stringify(body),
      });
      const text = await response.text();
      document.getElementById("result").textContent = response.status + "\n" + text;
    });
  </script>
</body>
</html>
"#;
