use super::html::{absolutize_url, all_attrs, all_texts, first_attr, first_text, select_all};
use super::{AdapterContext, FacilityStub, Locator, SLOW_SPACING, SourceAdapter};
use crate::extract::{apply_address, apply_contact, contact_from_href, split_address_in};
use crate::model::FacilityRecord;
use scraper::Html;
use std::time::Duration;
use tracing::debug;

const BASE_URL: &str = "https://www.sportcentral.cz";
const SPORTS: [&str; 9] = [
    "tenis",
    "badminton",
    "squash",
    "fotbal",
    "plavani",
    "basketbal",
    "fitness",
    "golf",
    "bowling",
];

pub struct SportCentral;

impl SourceAdapter for SportCentral {
    fn key(&self) -> &'static str {
        "sportcentral"
    }

    fn name(&self) -> &'static str {
        "SportCentral"
    }

    fn request_spacing(&self) -> Duration {
        SLOW_SPACING
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
        for item in select_all(page.root_element(), ".sports-venues-list .item") {
            let name = first_text(item, "h3 a");
            let Some(href) = first_attr(item, "h3 a", "href") else {
                debug!(source = self.key(), url = %page_url, "venue item without a link");
                continue;
            };
            if name.is_empty() {
                debug!(source = self.key(), url = %page_url, "venue item without a name");
                continue;
            }

            let detail_url = absolutize_url(page_url, &href);
            let record = FacilityRecord::stub(self.name(), &name, &detail_url, ctx.country);
            let mut stub = FacilityStub::new(record, locator);
            stub.detail_url = Some(detail_url);
            stubs.push(stub);
        }
        stubs
    }

    fn parse_detail(
        &self,
        ctx: &AdapterContext<'_>,
        stub: &mut FacilityStub,
        page: &Html,
        page_url: &str,
    ) {
        let root = page.root_element();
        let record = &mut stub.record;

        FacilityRecord::fill(&mut record.name, &first_text(root, "h1"));
        FacilityRecord::fill(&mut record.description, &first_text(root, ".venue-description"));
        let address = first_text(root, ".address");
        apply_address(record, &address, split_address_in(&address, ctx.regions));

        FacilityRecord::fill(&mut record.phone, &first_text(root, ".venue-phones"));
        for href in all_attrs(root, ".venue-url a, .venue-email a", "href") {
            apply_contact(record, contact_from_href(&href));
        }

        // One sport per tag, first table hit.
        for tag in all_texts(root, ".venue-sports .tag") {
            if let Some(sport) = ctx.sports.find_in_text(&tag) {
                record.sports.insert(sport.code.to_string());
            }
        }

        stub.evidence.extend(all_texts(root, ".venue-params .param"));

        if let Some(src) = first_attr(root, ".venue-main-photo img", "src") {
            record.push_image(absolutize_url(page_url, &src));
        }
        for href in all_attrs(root, ".venue-gallery a", "href") {
            record.push_image(absolutize_url(page_url, &href));
        }
    }
}
