use super::html::{absolutize_url, all_attrs, all_texts, element_text, first_text, select_all};
use super::{AdapterContext, FacilityStub, Locator, SLOW_SPACING, SourceAdapter};
use crate::extract::{apply_address, apply_contact, contact_from_text, split_address_in};
use crate::model::FacilityRecord;
use scraper::Html;
use std::time::Duration;
use tracing::debug;

const HOURS_PREFIX: &str = "Otevírací doba:";

/// SportovisteVCR has no usable listing; every locator is a configured
/// detail page that yields one record.
pub struct SportovisteVcr {
    pages: Vec<String>,
}

impl SportovisteVcr {
    pub fn new(pages: Vec<String>) -> Self {
        Self { pages }
    }
}

impl SourceAdapter for SportovisteVcr {
    fn key(&self) -> &'static str {
        "sportovistevcr"
    }

    fn name(&self) -> &'static str {
        "SportovisteVCR"
    }

    fn request_spacing(&self) -> Duration {
        SLOW_SPACING
    }

    fn locators(&self, _ctx: &AdapterContext<'_>) -> Vec<Locator> {
        self.pages.iter().cloned().map(Locator::Page).collect()
    }

    fn listing_url(&self, locator: &Locator) -> String {
        locator.to_string()
    }

    fn list_page(
        &self,
        ctx: &AdapterContext<'_>,
        locator: &Locator,
        page: &Html,
        page_url: &str,
    ) -> Vec<FacilityStub> {
        let root = page.root_element();
        let name = first_text(root, "h1");
        if name.is_empty() {
            debug!(source = self.key(), url = %page_url, "detail page without a heading");
            return Vec::new();
        }

        let mut record = FacilityRecord::stub(self.name(), &name, page_url, ctx.country);
        FacilityRecord::fill(&mut record.description, &first_text(root, ".desc"));
        let address = first_text(root, ".adress");
        apply_address(&mut record, &address, split_address_in(&address, ctx.regions));

        for item in select_all(root, ".contactsItem") {
            apply_contact(&mut record, contact_from_text(&element_text(item)));
        }

        for label in all_texts(root, ".detailItem.sports span") {
            if let Some(sport) = ctx.sports.find_in_text(&label) {
                record.sports.insert(sport.code.to_string());
            }
        }

        let hours = first_text(root, ".detailItem.hours");
        let hours = hours.strip_prefix(HOURS_PREFIX).unwrap_or(&hours);
        FacilityRecord::fill(&mut record.opening_hours, hours);

        for href in all_attrs(root, ".gallery a", "href") {
            record.push_image(absolutize_url(page_url, &href));
        }

        let mut stub = FacilityStub::new(record, locator);
        stub.evidence = all_texts(root, ".detailItemContent span");
        vec![stub]
    }
}
