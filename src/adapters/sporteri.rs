use super::html::{
    absolutize_url, all_attrs, element_text, first_attr, first_text, select_all, select_first,
};
use super::{AdapterContext, FacilityStub, Locator, SourceAdapter};
use crate::extract::{apply_address, apply_contact, contact_from_label, split_address_in};
use crate::model::{Attribute, FacilityRecord};
use scraper::Html;
use tracing::debug;

const BASE_URL: &str = "https://www.sporteri.cz";
const SPORTS: [&str; 6] = ["tenis", "badminton", "squash", "fotbal", "volejbal", "basketbal"];

/// Card icons that state an attribute outright.
const ICONS: [(&str, Attribute); 3] = [
    (".icon-indoor", Attribute::Indoor),
    (".icon-outdoor", Attribute::Outdoor),
    (".icon-parking", Attribute::Parking),
];

pub struct Sporteri;

impl SourceAdapter for Sporteri {
    fn key(&self) -> &'static str {
        "sporteri"
    }

    fn name(&self) -> &'static str {
        "Sporteri"
    }

    fn locators(&self, _ctx: &AdapterContext<'_>) -> Vec<Locator> {
        SPORTS
            .iter()
            .map(|sport| Locator::Sport(sport.to_string()))
            .collect()
    }

    fn listing_url(&self, locator: &Locator) -> String {
        format!("{BASE_URL}/vyhledat/{locator}")
    }

    fn list_page(
        &self,
        ctx: &AdapterContext<'_>,
        locator: &Locator,
        page: &Html,
        page_url: &str,
    ) -> Vec<FacilityStub> {
        let mut stubs = Vec::new();
        for card in select_all(page.root_element(), ".venue-card") {
            let name = first_text(card, ".venue-name a");
            if name.is_empty() {
                debug!(source = self.key(), url = %page_url, "venue card without a name");
                continue;
            }
            let detail_url = first_attr(card, ".venue-name a", "href")
                .map(|href| absolutize_url(page_url, &href));

            let mut record = FacilityRecord::stub(
                self.name(),
                &name,
                detail_url.as_deref().unwrap_or(page_url),
                ctx.country,
            );
            let address = first_text(card, ".venue-address");
            apply_address(&mut record, &address, split_address_in(&address, ctx.regions));
            for (icon, attr) in ICONS {
                if select_first(card, icon).is_some() {
                    record.mark(attr);
                }
            }

            let mut stub = FacilityStub::new(record, locator);
            stub.detail_url = detail_url;
            stubs.push(stub);
        }
        stubs
    }

    fn parse_detail(
        &self,
        _ctx: &AdapterContext<'_>,
        stub: &mut FacilityStub,
        page: &Html,
        page_url: &str,
    ) {
        let root = page.root_element();
        let record = &mut stub.record;

        FacilityRecord::fill(&mut record.description, &first_text(root, ".venue-description"));
        for src in all_attrs(root, ".venue-gallery img", "src") {
            record.push_image(absolutize_url(page_url, &src));
        }
        for item in select_all(root, ".venue-contacts .contact-item") {
            if let (Some(label), Some(value)) =
                (select_first(item, ".label"), select_first(item, ".value"))
            {
                let contact = contact_from_label(&element_text(label), &element_text(value));
                apply_contact(record, contact);
            }
        }
    }
}
