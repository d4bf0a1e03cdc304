//! HTML 렌더링.
//!
//! 템플릿 엔진 없이 const 템플릿 + 플레이스홀더 치환으로 충분한
//! 규모입니다. 차트는 Plotly CDN을 사용합니다.

use rust_decimal::prelude::ToPrimitive;
use sise_core::types::PriceSeries;

/// 차트에 쓰는 Plotly 버전 (CDN).
const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.32.0.min.js";

/// 사용자 입력을 HTML 텍스트에 넣기 전에 이스케이프합니다.
fn html_escape(s: &str) -> String {
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

/// 캔들 차트 트레이스용 컬럼 배열 (JSON 문자열).
struct CandleColumns {
    dates: String,
    opens: String,
    highs: String,
    lows: String,
    closes: String,
}

fn candle_columns(series: &PriceSeries) -> CandleColumns {
    let dates: Vec<String> = series.rows().iter().map(|r| r.date.to_string()).collect();
    let col = |f: fn(&sise_core::types::DailyPrice) -> rust_decimal::Decimal| -> Vec<f64> {
        series
            .rows()
            .iter()
            .map(|r| f(r).to_f64().unwrap_or(0.0))
            .collect()
    };

    // 시계열 컬럼은 우리가 만든 값이라 직렬화가 실패하지 않습니다.
    CandleColumns {
        dates: serde_json::to_string(&dates).unwrap_or_else(|_| "[]".to_string()),
        opens: serde_json::to_string(&col(|r| r.open)).unwrap_or_else(|_| "[]".to_string()),
        highs: serde_json::to_string(&col(|r| r.high)).unwrap_or_else(|_| "[]".to_string()),
        lows: serde_json::to_string(&col(|r| r.low)).unwrap_or_else(|_| "[]".to_string()),
        closes: serde_json::to_string(&col(|r| r.close)).unwrap_or_else(|_| "[]".to_string()),
    }
}

/// 대화형 조회 페이지를 렌더링합니다.
pub fn render_index(display_name: &str) -> String {
    INDEX_TEMPLATE
        .replace("__PLOTLY__", PLOTLY_CDN)
        .replace("__NAME__", &html_escape(display_name))
}

/// 단독으로 열리는 인터랙티브 캔들 차트 HTML을 만듭니다.
pub fn standalone_chart_html(query: &str, ticker: &str, series: &PriceSeries) -> String {
    let columns = candle_columns(series);
    let title = format!("[{}] 주가 차트 ({})", html_escape(query), ticker);

    STANDALONE_CHART_TEMPLATE
        .replace("__PLOTLY__", PLOTLY_CDN)
        .replace("__TITLE__", &title)
        .replace("__DATES__", &columns.dates)
        .replace("__OPENS__", &columns.opens)
        .replace("__HIGHS__", &columns.highs)
        .replace("__LOWS__", &columns.lows)
        .replace("__CLOSES__", &columns.closes)
}

const INDEX_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="ko">
<head>
<meta charset="utf-8">
<title>주가 조회</title>
<script src="__PLOTLY__"></script>
<style>
  body { font-family: sans-serif; max-width: 960px; margin: 2rem auto; padding: 0 1rem; }
  h1 { font-size: 1.4rem; }
  form { display: flex; gap: 0.5rem; flex-wrap: wrap; align-items: end; margin-bottom: 1rem; }
  label { display: flex; flex-direction: column; font-size: 0.85rem; gap: 0.2rem; }
  input { padding: 0.35rem; }
  button { padding: 0.4rem 1rem; }
  table { border-collapse: collapse; margin: 1rem 0; }
  th, td { border: 1px solid #ccc; padding: 0.3rem 0.7rem; text-align: right; }
  th { background: #f4f4f4; }
  .error { background: #fdecea; color: #b71c1c; padding: 0.6rem 1rem; margin: 0.5rem 0; border-radius: 4px; }
  .info { background: #e8f0fe; color: #1a467b; padding: 0.6rem 1rem; margin: 0.5rem 0; border-radius: 4px; }
  .hidden { display: none; }
  #downloads a { margin-right: 1rem; }
  #busy { color: #666; }
</style>
</head>
<body>
<h1>__NAME__ 가 제작한 페이지</h1>

<form id="lookup-form">
  <label>회사명 또는 종목코드
    <input type="text" id="q" name="q" placeholder="삼성전자 또는 005930">
  </label>
  <label>시작일
    <input type="date" id="start" name="start">
  </label>
  <label>종료일
    <input type="date" id="end" name="end">
  </label>
  <button type="submit">조회하기</button>
</form>

<p id="busy" class="hidden">데이터를 수집하는 중...</p>
<div id="quote-error" class="error hidden"></div>
<div id="quote-empty" class="info hidden">해당 기간의 주가 데이터가 없습니다.</div>

<section id="result" class="hidden">
  <h2 id="result-title"></h2>
  <p id="downloads">
    <a id="xlsx-link" href="#">&#128229; 엑셀 파일 다운로드</a>
    <a id="chart-link" href="#">&#128229; 차트 다운로드</a>
  </p>
  <table id="recent-table">
    <thead>
      <tr><th>날짜</th><th>시가</th><th>고가</th><th>저가</th><th>종가</th></tr>
    </thead>
    <tbody></tbody>
  </table>
  <div id="price-chart"></div>
</section>

<section id="forecast-section" class="hidden">
  <h2>향후 종가 예측</h2>
  <div id="forecast-error" class="error hidden"></div>
  <div id="forecast-chart"></div>
</section>

<script>
const $ = (id) => document.getElementById(id);

// 날짜 입력 기본값은 오늘
const today = new Date().toISOString().slice(0, 10);
$("start").value = today;
$("end").value = today;

function hide(id) { $(id).classList.add("hidden"); }
function show(id) { $(id).classList.remove("hidden"); }

$("lookup-form").addEventListener("submit", async (e) => {
  e.preventDefault();
  const q = $("q").value;
  const params = new URLSearchParams({ q, start: $("start").value, end: $("end").value });

  hide("quote-error"); hide("quote-empty"); hide("result"); hide("forecast-section");
  show("busy");
  try {
    await lookup(q, params);
  } finally {
    hide("busy");
  }
});

async function lookup(q, params) {
  const res = await fetch("/api/quote?" + params);
  if (!res.ok) {
    const body = await res.json();
    $("quote-error").textContent = body.message;
    show("quote-error");
    return;
  }
  const data = await res.json();
  if (data.empty) {
    show("quote-empty");
    return;
  }
  renderQuote(q, params, data);
  show("result");

  // 예측은 별도 요청: 실패해도 위의 시세 표와 차트는 그대로 남습니다.
  show("forecast-section");
  await renderForecast(q);
}

function renderQuote(q, params, data) {
  $("result-title").textContent = "[" + q + "] 주가 데이터 (" + data.ticker + ")";
  $("xlsx-link").href = "/api/export.xlsx?" + params;
  $("chart-link").href = "/api/chart.html?" + params;

  const tbody = $("recent-table").querySelector("tbody");
  tbody.innerHTML = "";
  for (const row of data.recent) {
    const tr = document.createElement("tr");
    for (const v of [row.date, row.open, row.high, row.low, row.close]) {
      const td = document.createElement("td");
      td.textContent = v;
      tr.appendChild(td);
    }
    tbody.appendChild(tr);
  }

  Plotly.newPlot("price-chart", [{
    type: "candlestick",
    x: data.rows.map((r) => r.date),
    open: data.rows.map((r) => r.open),
    high: data.rows.map((r) => r.high),
    low: data.rows.map((r) => r.low),
    close: data.rows.map((r) => r.close),
    increasing: { line: { color: "#d32f2f" } },
    decreasing: { line: { color: "#1565c0" } },
  }], {
    title: "일봉 차트",
    xaxis: { rangeslider: { visible: false } },
  });
}

async function renderForecast(q) {
  hide("forecast-error");
  const res = await fetch("/api/forecast?" + new URLSearchParams({ q }));
  if (!res.ok) {
    const body = await res.json();
    $("forecast-error").textContent = body.message;
    show("forecast-error");
    $("forecast-chart").innerHTML = "";
    return;
  }
  const data = await res.json();
  Plotly.newPlot("forecast-chart", [
    {
      type: "scatter",
      mode: "lines+markers",
      name: "최근 종가",
      x: data.observed.map((p) => p.date),
      y: data.observed.map((p) => p.close),
    },
    {
      type: "scatter",
      mode: "lines+markers",
      name: "예측 종가",
      line: { dash: "dash" },
      x: data.forecast.map((p) => p.date),
      y: data.forecast.map((p) => p.close),
    },
  ], { title: "향후 영업일 종가 예측" });
}
</script>
</body>
</html>
"##;

const STANDALONE_CHART_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="ko">
<head>
<meta charset="utf-8">
<title>__TITLE__</title>
<script src="__PLOTLY__"></script>
</head>
<body>
<div id="chart" style="width:100%;height:90vh;"></div>
<script>
Plotly.newPlot("chart", [{
  type: "candlestick",
  x: __DATES__,
  open: __OPENS__,
  high: __HIGHS__,
  low: __LOWS__,
  close: __CLOSES__,
  increasing: { line: { color: "#d32f2f" } },
  decreasing: { line: { color: "#1565c0" } },
}], {
  title: "__TITLE__",
  xaxis: { rangeslider: { visible: false } },
});
</script>
</body>
</html>
"##;
