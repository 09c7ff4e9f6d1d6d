/// Renders the page with the endpoint URL embedded as a script literal.
pub fn render_index(api_url: &str) -> String {
    INDEX_HTML.replace("{{API}}", &script_literal(api_url))
}

fn script_literal(value: &str) -> String {
    serde_json::Value::String(value.to_string())
        .to_string()
        .replace("</", "<\\/")
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Queue Courier</title>
  <style>
    :root {
      --bg: #f4f1ea;
      --ink: #25231f;
      --accent: #2f6f5e;
      --warn: #b5402c;
      --card: #ffffff;
      --shadow: 0 18px 44px rgba(37, 35, 31, 0.14);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: linear-gradient(160deg, var(--bg), #e6eee9);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px;
    }

    .app {
      width: min(560px, 100%);
      background: var(--card);
      border-radius: 24px;
      box-shadow: var(--shadow);
      padding: 32px;
      display: grid;
      gap: 22px;
    }

    h1 {
      margin: 0;
      font-size: 2rem;
    }

    .count {
      display: flex;
      align-items: baseline;
      gap: 12px;
    }

    .count .label {
      text-transform: uppercase;
      letter-spacing: 0.12em;
      font-size: 0.85rem;
      color: #7d776e;
    }

    #number {
      font-size: 2.2rem;
      font-weight: 600;
      color: var(--accent);
    }

    form {
      display: grid;
      gap: 12px;
    }

    input {
      border: 1px solid rgba(37, 35, 31, 0.2);
      border-radius: 12px;
      padding: 12px 14px;
      font-size: 1rem;
    }

    .submitbutton {
      border: none;
      border-radius: 999px;
      padding: 14px 20px;
      font-size: 1rem;
      font-weight: 600;
      color: white;
      background: var(--accent);
      cursor: pointer;
    }

    .submitbutton.disabled {
      opacity: 0.5;
      pointer-events: none;
    }

    .hidden {
      display: none;
    }

    .visible {
      display: block;
    }

    #info {
      color: var(--accent);
    }

    #warning {
      color: var(--warn);
    }
  </style>
</head>
<body>
  <main class="app">
    <h1>Queue Courier</h1>

    <div class="count">
      <span class="label">Messages waiting</span>
      <span id="number">-</span>
    </div>

    <form id="message-form">
      <input id="message" name="message" type="text" placeholder="Write a message" autocomplete="off" />
      <button class="submitbutton" type="submit">Send</button>
    </form>

    <p id="info" class="hidden"><span id="result"></span></p>
    <p id="warning" class="hidden"></p>
  </main>

  <script>
    const API_URL = {{API}};
    const FALLBACK_ERROR = 'Request failed';

    const numberEl = document.getElementById('number');
    const messageEl = document.getElementById('message');
    const resultEl = document.getElementById('result');
    const infoEl = document.getElementById('info');
    const warningEl = document.getElementById('warning');
    const submitEl = document.querySelector('.submitbutton');

    let inFlight = false;

    const reveal = (el) => {
      el.classList.remove('hidden');
      el.classList.add('visible');
    };

    const setSubmitEnabled = (enabled) => {
      submitEl.classList.toggle('disabled', !enabled);
      submitEl.disabled = !enabled;
    };

    const errorMessage = (err) => (err && typeof err.message === 'string' ? err.message : FALLBACK_ERROR);

    const request = (data, onSuccess, onFailure) => {
      fetch(API_URL, {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify(data)
      })
        .then(async (res) => {
          const body = await res.json().catch(() => null);
          if (!res.ok || !body || typeof body.message !== 'string') {
            throw { message: body && typeof body.message === 'string' ? body.message : FALLBACK_ERROR };
          }
          onSuccess(body);
        })
        .catch((err) => onFailure({ message: errorMessage(err) }));
    };

    const getCount = () => {
      request({ action: 'getcount' }, (res) => {
        numberEl.textContent = res.message;
      }, (err) => {
        console.log(err.message);
      });
    };

    const submitForm = (action) => {
      if (inFlight) {
        return false;
      }
      inFlight = true;
      setSubmitEnabled(false);

      const message = messageEl.value;
      if (action === 'sendmessage' && !message) {
        inFlight = false;
        setSubmitEnabled(true);
        warningEl.textContent = 'Message is Empty';
        reveal(warningEl);
        return false;
      }

      const data = action === 'sendmessage' ? { action, message } : { action };
      request(data, (res) => {
        resultEl.textContent = res.message;
        reveal(infoEl);
        inFlight = false;
        setSubmitEnabled(true);
      }, (err) => {
        console.log(err.message);
        warningEl.textContent = err.message;
        reveal(warningEl);
        inFlight = false;
        setSubmitEnabled(true);
      });
      return true;
    };

    document.getElementById('message-form').addEventListener('submit', (event) => {
      event.preventDefault();
      submitForm('sendmessage');
    });

    document.addEventListener('DOMContentLoaded', getCount);
  </script>
</body>
</html>
"#;
