use super::html::{first_text, select_all};
use super::{AdapterContext, FacilityStub, Locator, SourceAdapter};
use crate::extract::{apply_address, split_address_in};
use crate::model::{Attribute, FacilityRecord};
use scraper::Html;
use tracing::debug;

const BASE_URL: &str = "https://mapa.multisport.cz/cs";
const ACTIVITIES: [&str; 9] = [
    "fitness",
    "bazen",
    "tenis",
    "badminton",
    "squash",
    "bowling",
    "golf",
    "sauna",
    "lezecka-stena",
];

/// MultiSport partner map. Cards carry everything the map shows, there is no
/// detail page to follow.
pub struct MultiSport;

impl SourceAdapter for MultiSport {
    fn key(&self) -> &'static str {
        "multisport"
    }

    fn name(&self) -> &'static str {
        "MultiSport"
    }

    fn salts_identity(&self) -> bool {
        false
    }

    fn locators(&self, _ctx: &AdapterContext<'_>) -> Vec<Locator> {
        ACTIVITIES
            .iter()
            .map(|activity| Locator::Activity(activity.to_string()))
            .collect()
    }

    fn listing_url(&self, locator: &Locator) -> String {
        let activity = locator.category().unwrap_or_default();
        format!("{BASE_URL}/activity/{activity}")
    }

    fn list_page(
        &self,
        ctx: &AdapterContext<'_>,
        locator: &Locator,
        page: &Html,
        page_url: &str,
    ) -> Vec<FacilityStub> {
        let activity = locator.category().unwrap_or_default();

        let mut stubs = Vec::new();
        for card in select_all(page.root_element(), ".facility-card") {
            let name = first_text(card, ".facility-card__name");
            if name.is_empty() {
                debug!(source = self.key(), url = %page_url, "facility card without a name");
                continue;
            }

            let mut record = FacilityRecord::stub(self.name(), &name, page_url, ctx.country);
            record.description =
                format!("Sportoviště akceptující kartu MultiSport. Aktivita: {activity}");
            let address = first_text(card, ".facility-card__address");
            apply_address(&mut record, &address, split_address_in(&address, ctx.regions));
            record.mark(Attribute::Indoor);
            record.mark(Attribute::Showers);
            record.accepts_fitness_tokens = true;

            stubs.push(FacilityStub::new(record, locator));
        }
        stubs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regions::RegionTable;
    use crate::sports::SportTable;

    #[test]
    fn cards_become_complete_records_without_detail() {
        let (sports, regions) = (SportTable::default(), RegionTable::default());
        let ctx = AdapterContext {
            sports: &sports,
            regions: &regions,
            country: "Czech Republic",
        };
        let locator = Locator::Activity("bazen".to_string());
        let url = MultiSport.listing_url(&locator);
        assert_eq!(url, "https://mapa.multisport.cz/cs/activity/bazen");

        let html = Html::parse_document(
            r#"<div class="facility-card">
                 <div class="facility-card__name">Aquapark Olomouc</div>
                 <div class="facility-card__address">Kafkova 1223/2, 779 00 Olomouc</div>
               </div>"#,
        );
        let stubs = MultiSport.list_page(&ctx, &locator, &html, &url);
        assert_eq!(stubs.len(), 1);
        let stub = &stubs[0];
        assert!(stub.detail_url.is_none());
        assert_eq!(stub.category.as_deref(), Some("bazen"));

        let record = &stub.record;
        assert_eq!(record.source_url, url);
        assert_eq!(record.city, "Olomouc");
        assert_eq!(record.region, "Olomoucký kraj");
        assert!(record.description.ends_with("Aktivita: bazen"));
        assert!(record.is_indoor && record.has_showers && record.accepts_fitness_tokens);
        assert!(record.flags_consistent());
        assert!(!MultiSport.salts_identity());
    }
}
