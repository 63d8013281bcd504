// src/services/report_service.rs

use genpdf::{elements, style, Element};
use image::Luma;
use qrcode::QrCode;
use uuid::Uuid;

use crate::{common::error::AppError, db::DistributionRepository};

#[derive(Clone)]
pub struct ReportService {
    distributions: DistributionRepository,
    font_dir: String,
}

impl ReportService {
    pub fn new(distributions: DistributionRepository) -> Self {
        Self { distributions, font_dir: "./fonts".to_string() }
    }

    /// Renders a distribution receipt as a PDF in memory. The QR code carries
    /// the distribution id so field staff can check a paper receipt against
    /// the ledger.
    pub async fn distribution_receipt(&self, id: Uuid) -> Result<Vec<u8>, AppError> {
        let distribution = self
            .distributions
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound("distribution"))?;

        // Loads the font from the 'fonts/' directory.
        let font_family = genpdf::fonts::from_files(&self.font_dir, "Roboto", None)
            .map_err(|_| AppError::FontNotFound(format!("no Roboto fonts under {}", self.font_dir)))?;

        let mut doc = genpdf::Document::new(font_family);
        doc.set_title(format!("Distribution receipt {}", distribution.id));
        let mut decorator = genpdf::SimplePageDecorator::new();
        decorator.set_margins(10);
        doc.set_page_decorator(decorator);

        doc.push(
            elements::Paragraph::new("ANGAZA FOUNDATION")
                .styled(style::Style::new().bold().with_font_size(18)),
        );
        doc.push(
            elements::Paragraph::new("Distribution receipt")
                .styled(style::Style::new().with_font_size(12)),
        );
        doc.push(elements::Break::new(1.5));

        doc.push(elements::Paragraph::new(format!("Receipt #: {}", distribution.id)));
        if let Some(date) = distribution.date {
            doc.push(elements::Paragraph::new(format!("Date: {}", date.format("%Y-%m-%d"))));
        }
        doc.push(elements::Paragraph::new(format!("Recipient: {}", distribution.recipient)));
        doc.push(elements::Paragraph::new(format!("Location: {}", distribution.location)));
        doc.push(elements::Break::new(2));

        // Column weights: name (4), quantity (1), unit value (2), total (2)
        let mut table = elements::TableLayout::new(vec![4, 1, 2, 2]);
        table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));

        let style_bold = style::Style::new().bold();
        table
            .row()
            .element(elements::Paragraph::new("Resource").styled(style_bold))
            .element(elements::Paragraph::new("Qty").styled(style_bold))
            .element(elements::Paragraph::new("Unit value").styled(style_bold))
            .element(elements::Paragraph::new("Total").styled(style_bold))
            .push()
            .expect("table header");

        table
            .row()
            .element(elements::Paragraph::new(distribution.resource_name.clone()))
            .element(elements::Paragraph::new(distribution.quantity.to_string()))
            .element(elements::Paragraph::new(format!("{:.2}", distribution.unit_value)))
            .element(elements::Paragraph::new(format!("{:.2}", distribution.total_value)))
            .push()
            .expect("table row");

        doc.push(table);
        doc.push(elements::Break::new(2));

        let mut total_paragraph =
            elements::Paragraph::new(format!("TOTAL VALUE: {:.2}", distribution.total_value));
        total_paragraph.set_alignment(genpdf::Alignment::Right);
        doc.push(total_paragraph.styled(style::Style::new().bold().with_font_size(12)));
        doc.push(elements::Break::new(2));

        if let Some(notes) = &distribution.notes {
            doc.push(elements::Paragraph::new(format!("Notes: {notes}")));
            doc.push(elements::Break::new(1));
        }

        let code = QrCode::new(distribution.id.to_string().as_bytes())
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;

        let image_buffer = code.render::<Luma<u8>>().build();
        let dynamic_image = image::DynamicImage::ImageLuma8(image_buffer);

        let pdf_image = genpdf::elements::Image::from_dynamic_image(dynamic_image)
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?
            .with_scale(genpdf::Scale::new(0.5, 0.5));
        doc.push(pdf_image);

        let mut buffer = Vec::new();
        doc.render(&mut buffer)
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;

        Ok(buffer)
    }
}
