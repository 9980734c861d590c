use utoipa::OpenApi;
use crate::config;
use crate::models::{plant, sizing, units};

/// Schema document for the dashboard that renders sizing results. The engine
/// exposes no HTTP paths; only the record shapes are published.
#[derive(OpenApi)]
#[openapi(
    components(
        schemas(
            sizing::SizingInput,
            sizing::SizingResult,
            sizing::EquipmentCounts,
            sizing::ElectricalDesign,
            sizing::EnergyReport,
            sizing::CivilWorks,
            sizing::MonthlyResource,
            plant::ReferencePlant,
            config::Config,
            units::Megawatts,
            units::MegavoltAmperes,
            units::Watts,
            units::MegawattHours,
            units::Hectares,
            units::Meters,
            units::Tonnes,
            units::WattsPerSquareMeter,
            units::KilowattHoursPerSquareMeter,
            units::Celsius,
            units::Degrees,
            units::Volts
        )
    ),
    tags(
        (name = "pv-sizing", description = "Solar PV plant sizing for data-center loads")
    )
)]
pub struct ApiDoc;
