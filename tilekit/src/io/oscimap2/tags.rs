//! Static key and tag tables shared by every oscimap2 tile.

use crate::element::Tag;

/// Number of entries in [`TAGS`]. Element tag references below this value index the table.
pub const MAX: u32 = 628;
/// Element tag references at or above this value point into the tile-local tag table.
pub const LIMIT: u32 = 1024;

/// Keys a tile-local tag can reference through `TAG_KEYS`.
pub static KEYS: [&str; 63] = [
    "access",
    "addr:housename",
    "addr:housenumber",
    "addr:interpolation",
    "admin_level",
    "aerialway",
    "aeroway",
    "amenity",
    "area",
    "barrier",
    "bicycle",
    "brand",
    "bridge",
    "boundary",
    "building",
    "construction",
    "covered",
    "culvert",
    "cutting",
    "denomination",
    "disused",
    "embankment",
    "foot",
    "generator:source",
    "harbour",
    "highway",
    "historic",
    "horse",
    "intermittent",
    "junction",
    "landuse",
    "layer",
    "leisure",
    "lock",
    "man_made",
    "military",
    "motorcar",
    "name",
    "natural",
    "oneway",
    "operator",
    "population",
    "power",
    "power_source",
    "place",
    "railway",
    "ref",
    "religion",
    "route",
    "service",
    "shop",
    "sport",
    "surface",
    "toll",
    "tourism",
    "tower:type",
    "tracktype",
    "tunnel",
    "water",
    "waterway",
    "wetland",
    "width",
    "wood",
];

pub static TAGS: [Tag; 628] = [
    Tag::fixed("building", "yes"),
    Tag::fixed("highway", "residential"),
    Tag::fixed("highway", "service"),
    Tag::fixed("waterway", "stream"),
    Tag::fixed("highway", "unclassified"),
    Tag::fixed("highway", "track"),
    Tag::fixed("oneway", "yes"),
    Tag::fixed("natural", "water"),
    Tag::fixed("highway", "footway"),
    Tag::fixed("access", "private"),
    Tag::fixed("highway", "tertiary"),
    Tag::fixed("highway", "path"),
    Tag::fixed("highway", "secondary"),
    Tag::fixed("landuse", "forest"),
    Tag::fixed("bridge", "yes"),
    Tag::fixed("natural", "tree"),
    Tag::fixed("surface", "paved"),
    Tag::fixed("natural", "wood"),
    Tag::fixed("highway", "primary"),
    Tag::fixed("landuse", "grass"),
    Tag::fixed("landuse", "residential"),
    Tag::fixed("surface", "unpaved"),
    Tag::fixed("highway", "bus_stop"),
    Tag::fixed("surface", "asphalt"),
    Tag::fixed("bicycle", "yes"),
    Tag::fixed("amenity", "parking"),
    Tag::fixed("place", "locality"),
    Tag::fixed("railway", "rail"),
    Tag::fixed("service", "parking_aisle"),
    Tag::fixed("boundary", "administrative"),
    Tag::fixed("building", "house"),
    Tag::fixed("place", "village"),
    Tag::fixed("natural", "coastline"),
    Tag::fixed("tracktype", "grade2"),
    Tag::fixed("oneway", "no"),
    Tag::fixed("service", "driveway"),
    Tag::fixed("highway", "turning_circle"),
    Tag::fixed("place", "hamlet"),
    Tag::fixed("natural", "wetland"),
    Tag::fixed("tracktype", "grade3"),
    Tag::fixed("waterway", "river"),
    Tag::fixed("highway", "cycleway"),
    Tag::fixed("barrier", "fence"),
    Tag::fixed("building", "residential"),
    Tag::fixed("amenity", "school"),
    Tag::fixed("highway", "crossing"),
    Tag::fixed("admin_level", "8"),
    Tag::fixed("highway", "trunk"),
    Tag::fixed("amenity", "place_of_worship"),
    Tag::fixed("landuse", "farmland"),
    Tag::fixed("tracktype", "grade1"),
    Tag::fixed("highway", "road"),
    Tag::fixed("landuse", "farm"),
    Tag::fixed("surface", "gravel"),
    Tag::fixed("landuse", "meadow"),
    Tag::fixed("highway", "motorway"),
    Tag::fixed("highway", "traffic_signals"),
    Tag::fixed("building", "hut"),
    Tag::fixed("highway", "motorway_link"),
    Tag::fixed("tracktype", "grade4"),
    Tag::fixed("barrier", "gate"),
    Tag::fixed("highway", "living_street"),
    Tag::fixed("bicycle", "no"),
    Tag::fixed("leisure", "pitch"),
    Tag::fixed("tunnel", "yes"),
    Tag::fixed("surface", "ground"),
    Tag::fixed("highway", "steps"),
    Tag::fixed("natural", "land"),
    Tag::fixed("man_made", "survey_point"),
    Tag::fixed("tracktype", "grade5"),
    Tag::fixed("waterway", "ditch"),
    Tag::fixed("leisure", "park"),
    Tag::fixed("amenity", "restaurant"),
    Tag::fixed("barrier", "wall"),
    Tag::fixed("waterway", "riverbank"),
    Tag::fixed("amenity", "bench"),
    Tag::fixed("building", "garage"),
    Tag::fixed("natural", "scrub"),
    Tag::fixed("highway", "pedestrian"),
    Tag::fixed("natural", "peak"),
    Tag::fixed("building", "entrance"),
    Tag::fixed("landuse", "reservoir"),
    Tag::fixed("access", "yes"),
    Tag::fixed("bicycle", "designated"),
    Tag::fixed("leisure", "swimming_pool"),
    Tag::fixed("landuse", "farmyard"),
    Tag::fixed("railway", "level_crossing"),
    Tag::fixed("building", "apartments"),
    Tag::fixed("surface", "grass"),
    Tag::fixed("wheelchair", "yes"),
    Tag::fixed("service", "alley"),
    Tag::fixed("landuse", "industrial"),
    Tag::fixed("amenity", "fuel"),
    Tag::fixed("surface", "dirt"),
    Tag::fixed("highway", "trunk_link"),
    Tag::fixed("waterway", "drain"),
    Tag::fixed("barrier", "hedge"),
    Tag::fixed("amenity", "grave_yard"),
    Tag::fixed("tourism", "information"),
    Tag::fixed("shop", "supermarket"),
    Tag::fixed("highway", "primary_link"),
    Tag::fixed("wood", "deciduous"),
    Tag::fixed("leisure", "playground"),
    Tag::fixed("building", "roof"),
    Tag::fixed("building", "industrial"),
    Tag::fixed("amenity", "post_box"),
    Tag::fixed("waterway", "canal"),
    Tag::fixed("barrier", "bollard"),
    Tag::fixed("leisure", "garden"),
    Tag::fixed("wood", "mixed"),
    Tag::fixed("landuse", "cemetery"),
    Tag::fixed("landuse", "orchard"),
    Tag::fixed("shop", "convenience"),
    Tag::fixed("access", "permissive"),
    Tag::fixed("surface", "concrete"),
    Tag::fixed("surface", "paving_stones"),
    Tag::fixed("service", "spur"),
    Tag::fixed("building", "garages"),
    Tag::fixed("amenity", "bank"),
    Tag::fixed("tourism", "hotel"),
    Tag::fixed("access", "no"),
    Tag::fixed("amenity", "fast_food"),
    Tag::fixed("man_made", "pier"),
    Tag::fixed("amenity", "kindergarten"),
    Tag::fixed("access", "agricultural"),
    Tag::fixed("surface", "cobblestone"),
    Tag::fixed("wheelchair", "no"),
    Tag::fixed("amenity", "cafe"),
    Tag::fixed("amenity", "hospital"),
    Tag::fixed("amenity", "post_office"),
    Tag::fixed("amenity", "public_building"),
    Tag::fixed("amenity", "recycling"),
    Tag::fixed("highway", "street_lamp"),
    Tag::fixed("man_made", "tower"),
    Tag::fixed("waterway", "dam"),
    Tag::fixed("amenity", "pub"),
    Tag::fixed("wood", "coniferous"),
    Tag::fixed("access", "destination"),
    Tag::fixed("admin_level", "6"),
    Tag::fixed("landuse", "commercial"),
    Tag::fixed("amenity", "pharmacy"),
    Tag::fixed("railway", "abandoned"),
    Tag::fixed("service", "yard"),
    Tag::fixed("place", "island"),
    Tag::fixed("oneway", "-1"),
    Tag::fixed("landuse", "quarry"),
    Tag::fixed("landuse", "vineyard"),
    Tag::fixed("highway", "motorway_junction"),
    Tag::fixed("railway", "station"),
    Tag::fixed("landuse", "allotments"),
    Tag::fixed("barrier", "lift_gate"),
    Tag::fixed("admin_level", "10"),
    Tag::fixed("amenity", "telephone"),
    Tag::fixed("place", "town"),
    Tag::fixed("man_made", "cutline"),
    Tag::fixed("place", "suburb"),
    Tag::fixed("aeroway", "taxiway"),
    Tag::fixed("wheelchair", "limited"),
    Tag::fixed("highway", "secondary_link"),
    Tag::fixed("leisure", "sports_centre"),
    Tag::fixed("amenity", "bicycle_parking"),
    Tag::fixed("surface", "sand"),
    Tag::fixed("highway", "stop"),
    Tag::fixed("man_made", "works"),
    Tag::fixed("landuse", "retail"),
    Tag::fixed("amenity", "fire_station"),
    Tag::fixed("service", "siding"),
    Tag::fixed("amenity", "toilets"),
    Tag::fixed("bench", "yes"),
    Tag::fixed("oneway", "1"),
    Tag::fixed("surface", "compacted"),
    Tag::fixed("landuse", "basin"),
    Tag::fixed("amenity", "police"),
    Tag::fixed("railway", "tram"),
    Tag::fixed("route", "road"),
    Tag::fixed("natural", "cliff"),
    Tag::fixed("highway", "construction"),
    Tag::fixed("aeroway", "aerodrome"),
    Tag::fixed("entrance", "yes"),
    Tag::fixed("man_made", "storage_tank"),
    Tag::fixed("amenity", "atm"),
    Tag::fixed("tourism", "attraction"),
    Tag::fixed("route", "bus"),
    Tag::fixed("shop", "bakery"),
    Tag::fixed("tourism", "viewpoint"),
    Tag::fixed("amenity", "swimming_pool"),
    Tag::fixed("natural", "beach"),
    Tag::fixed("tourism", "picnic_site"),
    Tag::fixed("oneway", "true"),
    Tag::fixed("highway", "bridleway"),
    Tag::fixed("tourism", "camp_site"),
    Tag::fixed("abutters", "residential"),
    Tag::fixed("leisure", "nature_reserve"),
    Tag::fixed("amenity", "drinking_water"),
    Tag::fixed("shop", "clothes"),
    Tag::fixed("natural", "heath"),
    Tag::fixed("highway", "mini_roundabout"),
    Tag::fixed("landuse", "construction"),
    Tag::fixed("amenity", "waste_basket"),
    Tag::fixed("railway", "platform"),
    Tag::fixed("amenity", "townhall"),
    Tag::fixed("shop", "hairdresser"),
    Tag::fixed("amenity", "shelter"),
    Tag::fixed("admin_level", "9"),
    Tag::fixed("building", "farm_auxiliary"),
    Tag::fixed("amenity", "library"),
    Tag::fixed("building", "detached"),
    Tag::fixed("admin_level", "4"),
    Tag::fixed("landuse", "village_green"),
    Tag::fixed("barrier", "stile"),
    Tag::fixed("landuse", "garages"),
    Tag::fixed("amenity", "bar"),
    Tag::fixed("railway", "buffer_stop"),
    Tag::fixed("wetland", "marsh"),
    Tag::fixed("tourism", "museum"),
    Tag::fixed("barrier", "cycle_barrier"),
    Tag::fixed("route", "bicycle"),
    Tag::fixed("railway", "tram_stop"),
    Tag::fixed("amenity", "parking_space"),
    Tag::fixed("barrier", "retaining_wall"),
    Tag::fixed("landuse", "recreation_ground"),
    Tag::fixed("amenity", "university"),
    Tag::fixed("highway", "tertiary_link"),
    Tag::fixed("building", "terrace"),
    Tag::fixed("shop", "car_repair"),
    Tag::fixed("amenity", "hunting_stand"),
    Tag::fixed("amenity", "fountain"),
    Tag::fixed("man_made", "pipeline"),
    Tag::fixed("wetland", "swamp"),
    Tag::fixed("shop", "car"),
    Tag::fixed("bench", "no"),
    Tag::fixed("tunnel", "culvert"),
    Tag::fixed("building", "school"),
    Tag::fixed("barrier", "entrance"),
    Tag::fixed("railway", "disused"),
    Tag::fixed("railway", "crossing"),
    Tag::fixed("building", "church"),
    Tag::fixed("amenity", "social_facility"),
    Tag::fixed("natural", "bay"),
    Tag::fixed("shop", "kiosk"),
    Tag::fixed("amenity", "vending_machine"),
    Tag::fixed("route", "hiking"),
    Tag::fixed("natural", "spring"),
    Tag::fixed("leisure", "common"),
    Tag::fixed("railway", "switch"),
    Tag::fixed("waterway", "rapids"),
    Tag::fixed("admin_level", "7"),
    Tag::fixed("leisure", "stadium"),
    Tag::fixed("leisure", "track"),
    Tag::fixed("place", "isolated_dwelling"),
    Tag::fixed("place", "islet"),
    Tag::fixed("waterway", "weir"),
    Tag::fixed("amenity", "doctors"),
    Tag::fixed("access", "designated"),
    Tag::fixed("landuse", "conservation"),
    Tag::fixed("waterway", "artificial"),
    Tag::fixed("amenity", "bus_station"),
    Tag::fixed("leisure", "golf_course"),
    Tag::fixed("shop", "doityourself"),
    Tag::fixed("building", "service"),
    Tag::fixed("tourism", "guest_house"),
    Tag::fixed("aeroway", "runway"),
    Tag::fixed("place", "city"),
    Tag::fixed("railway", "subway"),
    Tag::fixed("man_made", "wastewater_plant"),
    Tag::fixed("building", "commercial"),
    Tag::fixed("railway", "halt"),
    Tag::fixed("amenity", "emergency_phone"),
    Tag::fixed("building", "retail"),
    Tag::fixed("barrier", "block"),
    Tag::fixed("leisure", "recreation_ground"),
    Tag::fixed("access", "forestry"),
    Tag::fixed("amenity", "college"),
    Tag::fixed("highway", "platform"),
    Tag::fixed("access", "unknown"),
    Tag::fixed("man_made", "water_tower"),
    Tag::fixed("surface", "pebblestone"),
    Tag::fixed("bridge", "viaduct"),
    Tag::fixed("shop", "butcher"),
    Tag::fixed("shop", "florist"),
    Tag::fixed("boundary", "landuse"),
    Tag::fixed("aeroway", "helipad"),
    Tag::fixed("building", "hangar"),
    Tag::fixed("natural", "glacier"),
    Tag::fixed("highway", "proposed"),
    Tag::fixed("shop", "mall"),
    Tag::fixed("barrier", "toll_booth"),
    Tag::fixed("amenity", "fire_hydrant"),
    Tag::fixed("building", "manufacture"),
    Tag::fixed("building", "farm"),
    Tag::fixed("surface", "wood"),
    Tag::fixed("amenity", "car_wash"),
    Tag::fixed("amenity", "dentist"),
    Tag::fixed("natural", "marsh"),
    Tag::fixed("man_made", "surveillance"),
    Tag::fixed("shop", "bicycle"),
    Tag::fixed("route", "foot"),
    Tag::fixed("amenity", "theatre"),
    Tag::fixed("building", "office"),
    Tag::fixed("railway", "light_rail"),
    Tag::fixed("man_made", "petroleum_well"),
    Tag::fixed("amenity", "taxi"),
    Tag::fixed("building", "greenhouse"),
    Tag::fixed("landuse", "brownfield"),
    Tag::fixed("bicycle", "permissive"),
    Tag::fixed("admin_level", "2"),
    Tag::fixed("aeroway", "apron"),
    Tag::fixed("building", "cabin"),
    Tag::fixed("amenity", "cinema"),
    Tag::fixed("access", "customers"),
    Tag::fixed("tourism", "motel"),
    Tag::fixed("railway", "narrow_gauge"),
    Tag::fixed("amenity", "marketplace"),
    Tag::fixed("shop", "furniture"),
    Tag::fixed("entrance", "staircase"),
    Tag::fixed("tourism", "artwork"),
    Tag::fixed("natural", "grassland"),
    Tag::fixed("shop", "books"),
    Tag::fixed("admin_level", "5"),
    Tag::fixed("man_made", "groyne"),
    Tag::fixed("waterway", "lock_gate"),
    Tag::fixed("highway", "emergency_access_point"),
    Tag::fixed("natural", "sand"),
    Tag::fixed("landuse", "military"),
    Tag::fixed("boundary", "protected_area"),
    Tag::fixed("amenity", "community_centre"),
    Tag::fixed("barrier", "kissing_gate"),
    Tag::fixed("highway", "speed_camera"),
    Tag::fixed("boundary", "national_park"),
    Tag::fixed("railway", "subway_entrance"),
    Tag::fixed("man_made", "silo"),
    Tag::fixed("shop", "alcohol"),
    Tag::fixed("highway", "give_way"),
    Tag::fixed("leisure", "slipway"),
    Tag::fixed("shop", "electronics"),
    Tag::fixed("bicycle", "dismount"),
    Tag::fixed("leisure", "marina"),
    Tag::fixed("entrance", "main"),
    Tag::fixed("boundary", "postal_code"),
    Tag::fixed("landuse", "greenhouse_horticulture"),
    Tag::fixed("highway", "milestone"),
    Tag::fixed("natural", "cave_entrance"),
    Tag::fixed("landuse", "landfill"),
    Tag::fixed("shop", "chemist"),
    Tag::fixed("shop", "shoes"),
    Tag::fixed("barrier", "cattle_grid"),
    Tag::fixed("landuse", "railway"),
    Tag::fixed("tourism", "hostel"),
    Tag::fixed("tourism", "chalet"),
    Tag::fixed("place", "county"),
    Tag::fixed("shop", "department_store"),
    Tag::fixed("highway", "ford"),
    Tag::fixed("natural", "scree"),
    Tag::fixed("landuse", "greenfield"),
    Tag::fixed("amenity", "nursing_home"),
    Tag::fixed("barrier", "wire_fence"),
    Tag::fixed("access", "restricted"),
    Tag::fixed("man_made", "reservoir_covered"),
    Tag::fixed("amenity", "bicycle_rental"),
    Tag::fixed("man_made", "MDF"),
    Tag::fixed("man_made", "water_well"),
    Tag::fixed("landuse", "field"),
    Tag::fixed("landuse", "wood"),
    Tag::fixed("shop", "hardware"),
    Tag::fixed("tourism", "alpine_hut"),
    Tag::fixed("natural", "tree_row"),
    Tag::fixed("tourism", "caravan_site"),
    Tag::fixed("bridge", "no"),
    Tag::fixed("wetland", "bog"),
    Tag::fixed("amenity", "courthouse"),
    Tag::fixed("route", "ferry"),
    Tag::fixed("barrier", "city_wall"),
    Tag::fixed("amenity", "veterinary"),
    Tag::fixed("shop", "jewelry"),
    Tag::fixed("building", "transportation"),
    Tag::fixed("amenity", "arts_centre"),
    Tag::fixed("bicycle", "official"),
    Tag::fixed("shop", "optician"),
    Tag::fixed("shop", "yes"),
    Tag::fixed("building", "collapsed"),
    Tag::fixed("shop", "garden_centre"),
    Tag::fixed("man_made", "chimney"),
    Tag::fixed("man_made", "mine"),
    Tag::fixed("bench", "unknown"),
    Tag::fixed("railway", "preserved"),
    Tag::fixed("building", "public"),
    Tag::fixed("amenity", "ferry_terminal"),
    Tag::fixed("highway", "raceway"),
    Tag::fixed("natural", "rock"),
    Tag::fixed("tunnel", "no"),
    Tag::fixed("building", "university"),
    Tag::fixed("shop", "beverages"),
    Tag::fixed("amenity", "waste_disposal"),
    Tag::fixed("building", "warehouse"),
    Tag::fixed("leisure", "water_park"),
    Tag::fixed("shop", "gift"),
    Tag::fixed("place", "farm"),
    Tag::fixed("wetland", "tidalflat"),
    Tag::fixed("waterway", "waterfall"),
    Tag::fixed("man_made", "dolphin"),
    Tag::fixed("service", "drive-through"),
    Tag::fixed("amenity", "nightclub"),
    Tag::fixed("building", "shed"),
    Tag::fixed("shop", "greengrocer"),
    Tag::fixed("natural", "fell"),
    Tag::fixed("wetland", "wet_meadow"),
    Tag::fixed("aeroway", "gate"),
    Tag::fixed("shop", "computer"),
    Tag::fixed("man_made", "lighthouse"),
    Tag::fixed("wetland", "reedbed"),
    Tag::fixed("man_made", "breakwater"),
    Tag::fixed("surface", "Dirt/Sand"),
    Tag::fixed("barrier", "ditch"),
    Tag::fixed("barrier", "yes"),
    Tag::fixed("amenity", "biergarten"),
    Tag::fixed("shop", "mobile_phone"),
    Tag::fixed("route", "mtb"),
    Tag::fixed("amenity", "grit_bin"),
    Tag::fixed("amenity", "bbq"),
    Tag::fixed("shop", "sports"),
    Tag::fixed("barrier", "wood_fence"),
    Tag::fixed("entrance", "home"),
    Tag::fixed("shop", "laundry"),
    Tag::fixed("man_made", "gasometer"),
    Tag::fixed("barrier", "embankment"),
    Tag::fixed("shop", "toys"),
    Tag::fixed("wetland", "saltmarsh"),
    Tag::fixed("waterway", "soakhole"),
    Tag::fixed("shop", "travel_agency"),
    Tag::fixed("man_made", "water_works"),
    Tag::fixed("route", "railway"),
    Tag::fixed("amenity", "prison"),
    Tag::fixed("highway", "rest_area"),
    Tag::fixed("shop", "stationery"),
    Tag::fixed("admin_level", "11"),
    Tag::fixed("building", "train_station"),
    Tag::fixed("building", "storage_tank"),
    Tag::fixed("man_made", "windmill"),
    Tag::fixed("shop", "beauty"),
    Tag::fixed("building", "semi"),
    Tag::fixed("highway", "services"),
    Tag::fixed("bicycle", "private"),
    Tag::fixed("route", "ski"),
    Tag::fixed("service", "emergency_access"),
    Tag::fixed("building", "factory"),
    Tag::fixed("man_made", "reinforced_slope"),
    Tag::fixed("amenity", "car_sharing"),
    Tag::fixed("surface", "earth"),
    Tag::fixed("shop", "hifi"),
    Tag::fixed("amenity", "car_rental"),
    Tag::fixed("barrier", "hedge_bank"),
    Tag::fixed("shop", "confectionery"),
    Tag::fixed("aeroway", "terminal"),
    Tag::fixed("highway", "passing_place"),
    Tag::fixed("building", "building"),
    Tag::fixed("man_made", "dyke"),
    Tag::fixed("building", "construction"),
    Tag::fixed("building", "shop"),
    Tag::fixed("natural", "reef"),
    Tag::fixed("landuse", "aquaculture"),
    Tag::fixed("shop", "dry_cleaning"),
    Tag::fixed("amenity", "embassy"),
    Tag::fixed("shop", "newsagent"),
    Tag::fixed("landuse", "salt_pond"),
    Tag::fixed("railway", "spur"),
    Tag::fixed("wheelchair", "unknown"),
    Tag::fixed("tourism", "zoo"),
    Tag::fixed("man_made", "waterway"),
    Tag::fixed("surface", "fine_gravel"),
    Tag::fixed("shop", "motorcycle"),
    Tag::fixed("building", "Building"),
    Tag::fixed("railway", "construction"),
    Tag::fixed("place", "neighbourhood"),
    Tag::fixed("route", "train"),
    Tag::fixed("building", "no"),
    Tag::fixed("natural", "mud"),
    Tag::fixed("place", "region"),
    Tag::fixed("landuse", "reservoir_watershed"),
    Tag::fixed("boundary", "marker"),
    Tag::fixed("man_made", "beacon"),
    Tag::fixed("shop", "outdoor"),
    Tag::fixed("access", "public"),
    Tag::fixed("abutters", "industrial"),
    Tag::fixed("building", "barn"),
    Tag::fixed("leisure", "picnic_table"),
    Tag::fixed("building", "hospital"),
    Tag::fixed("access", "official"),
    Tag::fixed("shop", "variety_store"),
    Tag::fixed("man_made", "crane"),
    Tag::fixed("amenity", "parking;fuel"),
    Tag::fixed("route", "tram"),
    Tag::fixed("tourism", "theme_park"),
    Tag::fixed("shop", "pet"),
    Tag::fixed("building", "kindergarten"),
    Tag::fixed("man_made", "storage"),
    Tag::fixed("man_made", "mast"),
    Tag::fixed("amenity", "parking_entrance"),
    Tag::fixed("amenity", "clock"),
    Tag::fixed("landuse", "industrial;retail"),
    Tag::fixed("shop", "video"),
    Tag::fixed("access", "delivery"),
    Tag::fixed("amenity", "driving_school"),
    Tag::fixed("service", "yes"),
    Tag::fixed("natural", "bare_rock"),
    Tag::fixed("building", "chapel"),
    Tag::fixed("natural", "volcano"),
    Tag::fixed("waterway", "dock"),
    Tag::fixed("building", "dormitory"),
    Tag::fixed("amenity", "boat_storage"),
    Tag::fixed("man_made", "tank"),
    Tag::fixed("man_made", "flagpole"),
    Tag::fixed("surface", "grass_paver"),
    Tag::fixed("shop", "organic"),
    Tag::fixed("natural", "landform"),
    Tag::fixed("highway", "unsurfaced"),
    Tag::fixed("route", "power"),
    Tag::fixed("surface", "mud"),
    Tag::fixed("building", "building_concrete"),
    Tag::fixed("abutters", "retail"),
    Tag::fixed("building", "store"),
    Tag::fixed("shop", "vacant"),
    Tag::fixed("leisure", "miniature_golf"),
    Tag::fixed("man_made", "monitoring_station"),
    Tag::fixed("natural", "waterfall"),
    Tag::fixed("aeroway", "hangar"),
    Tag::fixed("shop", "boutique"),
    Tag::fixed("route", "detour"),
    Tag::fixed("building", "way"),
    Tag::fixed("railway", "stop"),
    Tag::fixed("amenity", "ice_cream"),
    Tag::fixed("building", "storage"),
    Tag::fixed("shop", "car_parts"),
    Tag::fixed("natural", "ridge"),
    Tag::fixed("shop", "tyres"),
    Tag::fixed("railway", "dismantled"),
    Tag::fixed("amenity", "shop"),
    Tag::fixed("landuse", "plant_nursery"),
    Tag::fixed("building", "residentiel1"),
    Tag::fixed("barrier", "field_boundary"),
    Tag::fixed("barrier", "border_control"),
    Tag::fixed("surface", "Paved"),
    Tag::fixed("barrier", "sally_port"),
    Tag::fixed("amenity", "bureau_de_change"),
    Tag::fixed("leisure", "fishing"),
    Tag::fixed("amenity", "charging_station"),
    Tag::fixed("building", "supermarket"),
    Tag::fixed("highway", "stile"),
    Tag::fixed("amenity", "sauna"),
    Tag::fixed("place", "municipality"),
    Tag::fixed("building", "hotel"),
    Tag::fixed("surface", "metal"),
    Tag::fixed("highway", "incline_steep"),
    Tag::fixed("shop", "estate_agent"),
    Tag::fixed("natural", "grass"),
    Tag::fixed("shop", "pharmacy"),
    Tag::fixed("surface", "concrete:plates"),
    Tag::fixed("shop", "copyshop"),
    Tag::fixed("surface", "paving_stones:30"),
    Tag::fixed("surface", "interlock"),
    Tag::fixed("access", "hov"),
    Tag::fixed("highway", "elevator"),
    Tag::fixed("boundary", "local_authority"),
    Tag::fixed("man_made", "communications_tower"),
    Tag::fixed("shop", "deli"),
    Tag::fixed("barrier", "turnstile"),
    Tag::fixed("building", "offices"),
    Tag::fixed("building", "bunker"),
    Tag::fixed("natural", "stone"),
    Tag::fixed("railway", "railway_crossing"),
    Tag::fixed("leisure", "dog_park"),
    Tag::fixed("building", "semi-detached"),
    Tag::fixed("man_made", "watermill"),
    Tag::fixed("route", "trolleybus"),
    Tag::fixed("admin_level", "3"),
    Tag::fixed("building", "block"),
    Tag::fixed("barrier", "guard_rail"),
    Tag::fixed("bicycle", "unknown"),
    Tag::fixed("highway", "abandoned"),
    Tag::fixed("surface", "dirt/sand"),
    Tag::fixed("barrier", "chain"),
    Tag::fixed("barrier", "bump_gate"),
    Tag::fixed("building", "residental"),
    Tag::fixed("surface", "cement"),
    Tag::fixed("man_made", "embankment"),
    Tag::fixed("building", "ruins"),
    Tag::fixed("highway", "incline"),
    Tag::fixed("abutters", "commercial"),
    Tag::fixed("barrier", "hampshire_gate"),
    Tag::fixed("shop", "music"),
    Tag::fixed("shop", "funeral_directors"),
    Tag::fixed("wetland", "mangrove"),
    Tag::fixed("place", "borough"),
    Tag::fixed("building", "apartment"),
    Tag::fixed("boundary", "census"),
    Tag::fixed("barrier", "kerb"),
    Tag::fixed("building", "glasshouse"),
    Tag::fixed("aeroway", "holding_position"),
    Tag::fixed("shop", "general"),
    Tag::fixed("building", "tank"),
    Tag::fixed("railway", "monorail"),
    Tag::fixed("service", "parking"),
    Tag::fixed("place", "state"),
    Tag::fixed("railway", "proposed"),
    Tag::fixed("shop", "art"),
    Tag::fixed("natural", "hill"),
    Tag::fixed("railway", "turntable"),
    Tag::fixed("tourism", "cabin"),
    Tag::fixed("shop", "photo"),
    Tag::fixed("boundary", "lot"),
    Tag::fixed("shop", "fishmonger"),
    Tag::fixed("amenity", "clinic"),
    Tag::fixed("boundary", "political"),
    Tag::fixed("man_made", "well"),
    Tag::fixed("highway", "byway"),
    Tag::fixed("leisure", "horse_riding"),
    Tag::fixed("service", "bus"),
    Tag::fixed("building", "tower"),
    Tag::fixed("entrance", "service"),
    Tag::fixed("shop", "fabric"),
    Tag::fixed("railway", "miniature"),
    Tag::fixed("abutters", "mixed"),
    Tag::fixed("surface", "stone"),
    Tag::fixed("access", "emergency"),
    Tag::fixed("landuse", "mine"),
    Tag::fixed("amenity", "shower"),
    Tag::fixed("waterway", "lock"),
    Tag::fixed("area", "yes"),
    Tag::fixed("landuse", "urban"),
];
