//! 일봉 시세 xlsx 내보내기.
//!
//! 전체 시계열을 시트 하나("Sheet1")에 기록합니다. 첫 컬럼은
//! `YYYY-MM-DD` 형식의 날짜 인덱스이고 이어서 시가/고가/저가/종가
//! 숫자 컬럼이 옵니다.

use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::Workbook;
use sise_core::types::PriceSeries;

use crate::error::ExportError;

/// 시트 이름.
pub const SHEET_NAME: &str = "Sheet1";

/// 컬럼 헤더 (날짜 인덱스 + OHLC).
pub const HEADERS: [&str; 5] = ["날짜", "시가", "고가", "저가", "종가"];

/// 시계열 전체를 xlsx 워크북 바이트로 내보냅니다.
pub fn write_price_series_xlsx(series: &PriceSeries) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, header) in HEADERS.iter().enumerate() {
        sheet.write_string(0, col as u16, *header)?;
    }

    for (i, row) in series.rows().iter().enumerate() {
        let r = (i + 1) as u32;
        sheet.write_string(r, 0, row.date.format("%Y-%m-%d").to_string())?;

        for (col, value) in [row.open, row.high, row.low, row.close].iter().enumerate() {
            let number = value
                .to_f64()
                .ok_or_else(|| ExportError::Value(format!("{} (행 {})", value, i + 1)))?;
            sheet.write_number(r, (col + 1) as u16, number)?;
        }
    }

    Ok(workbook.save_to_buffer()?)
}
