use super::html::{
    absolutize_url, all_attrs, element_text, first_attr, first_text, select_all, select_first,
};
use super::{AdapterContext, FacilityStub, Locator, SourceAdapter};
use crate::extract::{apply_address, apply_contact, contact_from_label, split_address_in};
use crate::model::FacilityRecord;
use scraper::Html;
use tracing::debug;

const BASE_URL: &str = "https://www.fitmapa.cz";
const SPORTS: [&str; 6] = ["tenis", "badminton", "fotbal", "volejbal", "squash", "basketbal"];

/// FitMapa search pages, one per sport and region.
pub struct FitMapa;

impl SourceAdapter for FitMapa {
    fn key(&self) -> &'static str {
        "fitmapa"
    }

    fn name(&self) -> &'static str {
        "FitMapa"
    }

    fn locators(&self, ctx: &AdapterContext<'_>) -> Vec<Locator> {
        SPORTS
            .iter()
            .flat_map(|sport| {
                ctx.regions.slugs().map(move |region| Locator::SportRegion {
                    sport: sport.to_string(),
                    region: region.to_string(),
                })
            })
            .collect()
    }

    fn listing_url(&self, locator: &Locator) -> String {
        match locator {
            Locator::SportRegion { sport, region } => {
                format!("{BASE_URL}/hledat/{}/{region}", sport.replace(' ', "-"))
            }
            other => format!("{BASE_URL}/hledat/{other}"),
        }
    }

    fn list_page(
        &self,
        ctx: &AdapterContext<'_>,
        locator: &Locator,
        page: &Html,
        page_url: &str,
    ) -> Vec<FacilityStub> {
        let region = match locator {
            Locator::SportRegion { region, .. } => ctx
                .regions
                .from_slug(region)
                .map(ToString::to_string)
                .unwrap_or_else(|| region.clone()),
            _ => String::new(),
        };

        let mut stubs = Vec::new();
        for item in select_all(page.root_element(), ".place-item") {
            let name = first_text(item, ".place-title a");
            if name.is_empty() {
                debug!(source = self.key(), url = %page_url, "place card without a name");
                continue;
            }
            let detail_url = first_attr(item, ".place-title a", "href")
                .map(|href| absolutize_url(page_url, &href));

            let mut record = FacilityRecord::stub(
                self.name(),
                &name,
                detail_url.as_deref().unwrap_or(page_url),
                ctx.country,
            );
            record.region = region.clone();
            let address = first_text(item, ".place-address");
            apply_address(&mut record, &address, split_address_in(&address, ctx.regions));

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

        FacilityRecord::fill(&mut record.description, &first_text(root, ".place-description"));
        for src in all_attrs(root, ".place-gallery img", "src") {
            record.push_image(absolutize_url(page_url, &src));
        }
        for item in select_all(root, ".contact-info .info-item") {
            if let (Some(label), Some(value)) =
                (select_first(item, ".label"), select_first(item, ".value"))
            {
                let contact = contact_from_label(&element_text(label), &element_text(value));
                apply_contact(record, contact);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regions::RegionTable;
    use crate::sports::SportTable;

    const LISTING: &str = r#"
        <div class="place-item">
          <h3 class="place-title"><a href="/misto/tk-stvanice">TK Štvanice</a></h3>
          <p class="place-address">Ostrovní 15, 110 00 Praha 1</p>
        </div>
        <div class="place-item"><h3 class="place-title"></h3></div>
    "#;

    const DETAIL: &str = r#"
        <div class="place-description">Venkovní antukové kurty, občerstvení.</div>
        <div class="place-gallery"><img src="/img/1.jpg"><img src="/img/1.jpg"><img></div>
        <ul class="contact-info">
          <li class="info-item"><span class="label">Telefon</span><span class="value">222 333 444</span></li>
          <li class="info-item"><span class="label">Web</span><span class="value">www.stvanice.cz</span></li>
        </ul>
    "#;

    fn ctx<'a>(sports: &'a SportTable, regions: &'a RegionTable) -> AdapterContext<'a> {
        AdapterContext {
            sports,
            regions,
            country: "Czech Republic",
        }
    }

    #[test]
    fn locators_cover_every_sport_and_region() {
        let (sports, regions) = (SportTable::default(), RegionTable::default());
        let locators = FitMapa.locators(&ctx(&sports, &regions));
        assert_eq!(locators.len(), 6 * 14);
        assert_eq!(
            FitMapa.listing_url(&locators[0]),
            "https://www.fitmapa.cz/hledat/tenis/praha"
        );
    }

    #[test]
    fn listing_card_and_detail_fill_record() {
        let (sports, regions) = (SportTable::default(), RegionTable::default());
        let ctx = ctx(&sports, &regions);
        let locator = Locator::SportRegion {
            sport: "tenis".to_string(),
            region: "praha".to_string(),
        };
        let url = "https://www.fitmapa.cz/hledat/tenis/praha";

        let mut stubs = FitMapa.list_page(&ctx, &locator, &Html::parse_document(LISTING), url);
        assert_eq!(stubs.len(), 1);
        let stub = &mut stubs[0];
        assert_eq!(stub.record.name, "TK Štvanice");
        assert_eq!(stub.record.region, "Praha");
        assert_eq!(stub.record.city, "Praha 1");
        assert_eq!(stub.record.postal_code, "110 00");
        assert_eq!(stub.category.as_deref(), Some("tenis"));
        let detail_url = stub.detail_url.clone().unwrap();
        assert_eq!(detail_url, "https://www.fitmapa.cz/misto/tk-stvanice");
        assert_eq!(stub.record.source_url, detail_url);

        FitMapa.parse_detail(&ctx, stub, &Html::parse_document(DETAIL), &detail_url);
        assert_eq!(stub.record.description, "Venkovní antukové kurty, občerstvení.");
        assert_eq!(stub.record.images, vec!["https://www.fitmapa.cz/img/1.jpg"]);
        assert_eq!(stub.record.phone, "222 333 444");
        assert_eq!(stub.record.website, "www.stvanice.cz");
    }
}
