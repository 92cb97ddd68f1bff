use super::html::{absolutize_url, all_attrs, first_attr, first_text, select_all, select_first};
use super::{AdapterContext, FacilityStub, Locator, SLOW_SPACING, SourceAdapter};
use crate::extract::{apply_address, apply_contact, contact_from_href, split_address_in};
use crate::model::FacilityRecord;
use scraper::Html;
use std::time::Duration;
use tracing::debug;

const BASE_URL: &str = "https://www.kdesportovat.cz";
const SPORTS: [&str; 15] = [
    "atletika",
    "badminton",
    "basketbal",
    "bowling",
    "cyklistika",
    "fitness",
    "florbal",
    "fotbal",
    "golf",
    "hokej",
    "plavani",
    "squash",
    "stolni-tenis",
    "tenis",
    "volejbal",
];

/// KdeSportovat category listings. Rows hold only a link, the record is
/// filled from the detail page.
pub struct KdeSportovat;

impl SourceAdapter for KdeSportovat {
    fn key(&self) -> &'static str {
        "kdesportovat"
    }

    fn name(&self) -> &'static str {
        "KdeSportovat"
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
        format!("{BASE_URL}/hazenky-a-hriste/{locator}/")
    }

    fn list_page(
        &self,
        ctx: &AdapterContext<'_>,
        locator: &Locator,
        page: &Html,
        page_url: &str,
    ) -> Vec<FacilityStub> {
        let mut stubs = Vec::new();
        for row in select_all(page.root_element(), ".record") {
            let name = first_text(row, "h2 a");
            let Some(href) = first_attr(row, "h2 a", "href") else {
                debug!(source = self.key(), url = %page_url, "record row without a link");
                continue;
            };
            if name.is_empty() {
                debug!(source = self.key(), url = %page_url, "record row without a name");
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
        FacilityRecord::fill(&mut record.description, &first_text(root, ".record-detail-text"));

        if let Some(contact) = select_first(root, ".record-detail-contact") {
            let address = first_text(contact, ".address");
            apply_address(record, &address, split_address_in(&address, ctx.regions));
            for href in all_attrs(contact, "a", "href") {
                apply_contact(record, contact_from_href(&href));
            }
        }

        for src in all_attrs(root, ".record-detail-gallery img", "src") {
            record.push_image(absolutize_url(page_url, &src));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regions::RegionTable;
    use crate::sports::SportTable;

    #[test]
    fn rows_without_links_are_skipped() {
        let (sports, regions) = (SportTable::default(), RegionTable::default());
        let ctx = AdapterContext {
            sports: &sports,
            regions: &regions,
            country: "Czech Republic",
        };
        let locator = Locator::Sport("stolni-tenis".to_string());
        let url = KdeSportovat.listing_url(&locator);
        assert_eq!(url, "https://www.kdesportovat.cz/hazenky-a-hriste/stolni-tenis/");

        let html = Html::parse_document(
            r#"<div class="record"><h2><a href="/sportoviste/herna-spin">Herna Spin</a></h2></div>
               <div class="record"><h2><a>Bez odkazu</a></h2></div>"#,
        );
        let stubs = KdeSportovat.list_page(&ctx, &locator, &html, &url);
        assert_eq!(stubs.len(), 1);
        assert_eq!(
            stubs[0].detail_url.as_deref(),
            Some("https://www.kdesportovat.cz/sportoviste/herna-spin")
        );
        assert_eq!(KdeSportovat.request_spacing(), Duration::from_millis(1500));
    }

    #[test]
    fn detail_page_supplies_address_and_contacts() {
        let (sports, regions) = (SportTable::default(), RegionTable::default());
        let ctx = AdapterContext {
            sports: &sports,
            regions: &regions,
            country: "Czech Republic",
        };
        let url = "https://www.kdesportovat.cz/sportoviste/herna-spin";
        let record = FacilityRecord::stub("KdeSportovat", "Herna Spin", url, "Czech Republic");
        let mut stub = FacilityStub::new(record, &Locator::Sport("stolni-tenis".to_string()));

        let html = Html::parse_document(
            r#"<h1>Herna Spin Liberec</h1>
               <div class="record-detail-text">Krytá herna se šatnami.</div>
               <div class="record-detail-contact">
                 <p class="address">Jablonecká 20, 460 01 Liberec</p>
                 <a href="tel:+420485000111">zavolat</a>
                 <a href="mailto:herna@spin.cz">napsat</a>
                 <a href="https://www.spin.cz">web</a>
               </div>
               <div class="record-detail-gallery"><img src="/foto/spin.jpg"></div>"#,
        );
        KdeSportovat.parse_detail(&ctx, &mut stub, &html, url);

        let record = &stub.record;
        assert_eq!(record.name, "Herna Spin Liberec");
        assert_eq!(record.city, "Liberec");
        assert_eq!(record.region, "Liberecký kraj");
        assert_eq!(record.phone, "+420485000111");
        assert_eq!(record.email, "herna@spin.cz");
        assert_eq!(record.website, "https://www.spin.cz");
        assert_eq!(record.images, vec!["https://www.kdesportovat.cz/foto/spin.jpg"]);
    }
}
