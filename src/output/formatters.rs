use super::{ReportFields, csv_escape, json_number, json_string};
use crate::compute::PointReport;
use std::io::{self, Write};

pub trait Formatter {
    fn write_report(&mut self, report: &PointReport) -> io::Result<()>;
}

pub struct TextFormatter<'a, W: Write> {
    writer: &'a mut W,
}

impl<'a, W: Write> TextFormatter<'a, W> {
    pub fn new(writer: &'a mut W) -> Self {
        Self { writer }
    }
}

impl<'a, W: Write> Formatter for TextFormatter<'a, W> {
    fn write_report(&mut self, report: &PointReport) -> io::Result<()> {
        let fields = ReportFields::from_report(report);
        writeln!(self.writer, "{}", report.description)?;
        writeln!(self.writer, "\tStrategy: {}", report.strategy)?;
        writeln!(self.writer, "\tSolstice: {}", fields.solstice_local)?;
        writeln!(self.writer, "\tShortest shadow at: {}", fields.instant_local)?;
        writeln!(self.writer, "\tSun altitude: {:.6}°", report.best_altitude)?;
        match &report.shadow {
            Some(Ok(length)) => writeln!(self.writer, "\tShadow length: {:.3}m", length)?,
            Some(Err(err)) => writeln!(self.writer, "\tShadow length: {}", err)?,
            None => {}
        }
        self.writer.flush()
    }
}

pub struct CsvFormatter<'a, W: Write> {
    writer: &'a mut W,
    headers: bool,
    first: bool,
}

impl<'a, W: Write> CsvFormatter<'a, W> {
    pub fn new(writer: &'a mut W, headers: bool) -> Self {
        Self {
            writer,
            headers,
            first: true,
        }
    }
}

impl<'a, W: Write> Formatter for CsvFormatter<'a, W> {
    fn write_report(&mut self, report: &PointReport) -> io::Result<()> {
        if self.first && self.headers {
            writeln!(
                self.writer,
                "index,description,strategy,solstice,dateTime,altitude,objectHeight,shadowLength"
            )?;
        }
        self.first = false;

        let fields = ReportFields::from_report(report);
        let height = report
            .object_height
            .map(|h| format!("{:.3}", h))
            .unwrap_or_default();
        let shadow = fields
            .shadow_length
            .map(|length| format!("{:.3}", length))
            .unwrap_or_default();
        writeln!(
            self.writer,
            "{},{},{},{},{},{:.6},{},{}",
            report.index,
            csv_escape(report.description),
            report.strategy,
            fields.solstice_rfc3339,
            fields.instant_rfc3339,
            report.best_altitude,
            height,
            shadow
        )?;
        self.writer.flush()
    }
}

pub struct JsonFormatter<'a, W: Write> {
    writer: &'a mut W,
}

impl<'a, W: Write> JsonFormatter<'a, W> {
    pub fn new(writer: &'a mut W) -> Self {
        Self { writer }
    }
}

impl<'a, W: Write> Formatter for JsonFormatter<'a, W> {
    fn write_report(&mut self, report: &PointReport) -> io::Result<()> {
        let fields = ReportFields::from_report(report);
        let shadow_error = match &fields.shadow_error {
            Some(message) => json_string(message),
            None => "null".to_string(),
        };
        writeln!(
            self.writer,
            r#"{{"index":{},"description":{},"strategy":"{}","solstice":"{}","dateTime":"{}","altitude":{},"probes":{},"objectHeight":{},"shadowLength":{},"shadowError":{}}}"#,
            report.index,
            json_string(report.description),
            report.strategy,
            fields.solstice_rfc3339,
            fields.instant_rfc3339,
            json_number(Some(report.best_altitude)),
            report.probes,
            json_number(report.object_height),
            json_number(fields.shadow_length),
            shadow_error
        )?;
        self.writer.flush()
    }
}
