use approx::assert_relative_eq;

use crate::commands::{find_nearest, where_am_i, LocationReport};
use crate::config::MonumentIndexConfig;
use crate::error::{MonumentError, WorldSourceError};
use crate::features::{FeatureKind, FeatureKinds};
use crate::foundation::math::utils::quat_from_euler_degrees;
use crate::foundation::math::{Point3, Pose, Vec3};
use crate::geometry::LocalBounds;
use crate::service::MonumentService;
use crate::spatial::SpatialIndexBuilder;
use crate::world::{
    BaseLinkType, ChildObject, DungeonBaseLink, DungeonGridCell, LinkVolume, MonumentRecord,
    PrefabGroup, SpawnedInstance, WorldObjectId, WorldSource,
};

const EPSILON: f32 = 1e-4;

/// In-memory world with a switch to break the facility accessor
#[derive(Default)]
struct FakeWorld {
    monuments: Vec<MonumentRecord>,
    cells: Vec<DungeonGridCell>,
    links: Vec<DungeonBaseLink>,
    groups: Vec<PrefabGroup>,
    links_unavailable: bool,
}

impl WorldSource for FakeWorld {
    fn monuments(&self) -> Vec<MonumentRecord> {
        self.monuments.clone()
    }

    fn dungeon_grid_cells(&self) -> Vec<DungeonGridCell> {
        self.cells.clone()
    }

    fn dungeon_base_links(&self) -> Result<Vec<DungeonBaseLink>, WorldSourceError> {
        if self.links_unavailable {
            return Err(WorldSourceError::Unavailable("base link list".to_string()));
        }
        Ok(self.links.clone())
    }

    fn prefab_groups(&self) -> Vec<PrefabGroup> {
        self.groups.clone()
    }
}

fn monument(id: u64, path: &str, position: Point3, size: f32) -> MonumentRecord {
    MonumentRecord {
        id: WorldObjectId(id),
        prefab_path: path.to_string(),
        pose: Pose::from_position(position),
        bounds: LocalBounds::new(Vec3::zeros(), Vec3::new(size, size, size)),
    }
}

fn cell(name: &str, position: Point3) -> DungeonGridCell {
    DungeonGridCell {
        prefab_path: format!("assets/bundled/prefabs/autospawn/tunnel/{name}.prefab"),
        pose: Pose::from_position(position),
    }
}

fn link(name: &str, link_type: BaseLinkType, rooms: &[Point3]) -> DungeonBaseLink {
    DungeonBaseLink {
        prefab_path: format!("assets/bundled/prefabs/autospawn/tunnel-underwater/{name}.prefab"),
        pose: Pose::from_position(rooms.first().copied().unwrap_or_else(Point3::origin)),
        link_type,
        volumes: rooms
            .iter()
            .map(|p| LinkVolume {
                pose: Pose::from_position(*p),
                bounds: LocalBounds::new(Vec3::zeros(), Vec3::new(12.0, 6.0, 12.0)),
            })
            .collect(),
    }
}

fn sample_world() -> FakeWorld {
    FakeWorld {
        monuments: vec![
            monument(1, "assets/bundled/prefabs/autospawn/monument/small/gas_station_1.prefab", Point3::new(0.0, 0.0, 0.0), 10.0),
            monument(2, "assets/bundled/prefabs/autospawn/monument/large/airfield_1.prefab", Point3::new(100.0, 0.0, 0.0), 10.0),
        ],
        cells: vec![
            cell("straight-sn-0", Point3::new(0.0, -200.0, 0.0)),
            cell("transition-sn-0", Point3::new(0.0, -200.0, 20.0)),
            cell("TRANSITION-WE-1", Point3::new(20.0, -200.0, 0.0)),
            cell("station-sn-2", Point3::new(0.0, -200.0, 200.0)),
        ],
        links: vec![
            link("entrance", BaseLinkType::Start, &[Point3::new(500.0, -40.0, 500.0)]),
            link("corridor_end", BaseLinkType::End, &[Point3::new(520.0, -40.0, 500.0)]),
            link(
                "module_1200",
                BaseLinkType::Segment,
                &[Point3::new(540.0, -40.0, 500.0), Point3::new(560.0, -40.0, 500.0)],
            ),
        ],
        groups: vec![PrefabGroup {
            prefab_path: "assets/bundled/prefabs/autospawn/monument/roadside/oxums_station.prefab".to_string(),
            instances: vec![SpawnedInstance {
                children: vec![ChildObject {
                    name: "assets/bundled/prefabs/autospawn/monument/monument_marker.prefab".to_string(),
                    has_marker_component: true,
                    owning_monument: Some(WorldObjectId(1)),
                }],
            }],
        }],
        links_unavailable: false,
    }
}

#[test]
fn test_build_counts_and_order() {
    let config = MonumentIndexConfig::default();
    let index = SpatialIndexBuilder::new(&config).build(&sample_world());

    assert_eq!(index.facility_modules().len(), 2);
    assert_eq!(index.tunnels().len(), 2);
    assert_eq!(index.monuments().len(), 2);
    assert_eq!(index.len(), 6);

    let report = index.report();
    assert_eq!(report.total(), 6);
    assert_eq!(report.excluded, 3);
    assert_eq!(report.skipped, 0);
    assert_eq!(report.aliases, 1);

    let kinds: Vec<_> = index.all().iter().map(|f| f.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            FeatureKind::FacilityLinkModule,
            FeatureKind::FacilityLinkModule,
            FeatureKind::TrainTunnelSegment,
            FeatureKind::TrainTunnelSegment,
            FeatureKind::NormalMonument,
            FeatureKind::NormalMonument,
        ]
    );
}

#[test]
fn test_transition_cells_never_indexed() {
    let config = MonumentIndexConfig::default();
    let index = SpatialIndexBuilder::new(&config).build(&sample_world());

    assert!(index
        .all()
        .iter()
        .all(|f| !f.short_name().to_ascii_lowercase().starts_with("transition-")));
    assert!(index.find_by_name("transition-sn-0").is_none());
}

#[test]
fn test_links_without_rooms_are_excluded() {
    let world = FakeWorld {
        links: vec![
            link("corridor", BaseLinkType::Segment, &[]),
            link("airlock", BaseLinkType::Start, &[]),
        ],
        ..FakeWorld::default()
    };
    let config = MonumentIndexConfig::default();
    let index = SpatialIndexBuilder::new(&config).build(&world);

    assert!(index.facility_modules().is_empty());
    assert_eq!(index.report().excluded, 2);
    assert_eq!(index.report().skipped, 0);
}

#[test]
fn test_end_links_contribute_nothing() {
    let world = FakeWorld {
        links: vec![link("corridor_end", BaseLinkType::End, &[Point3::new(0.0, -40.0, 0.0)])],
        ..FakeWorld::default()
    };
    let config = MonumentIndexConfig::default();
    let index = SpatialIndexBuilder::new(&config).build(&world);

    assert!(index.is_empty());
    assert_eq!(index.report().excluded, 1);
}

#[test]
fn test_facility_module_has_one_volume_per_room() {
    let config = MonumentIndexConfig::default();
    let index = SpatialIndexBuilder::new(&config).build(&sample_world());

    let module = index.find_by_name("module_1200").unwrap();
    assert_eq!(module.volumes().len(), 2);
    assert!(module.is_in_bounds(&Point3::new(560.0, -40.0, 500.0)));
    assert!(!module.is_in_bounds(&Point3::new(550.0, -40.0, 500.0)));
}

#[test]
fn test_alias_resolves_only_for_marked_monument() {
    let config = MonumentIndexConfig::default();
    let index = SpatialIndexBuilder::new(&config).build(&sample_world());

    let gas_station = index.find_by_name("gas_station_1").unwrap();
    assert_eq!(
        gas_station.alias(),
        Some("assets/bundled/prefabs/autospawn/monument/roadside/oxums_station.prefab")
    );
    assert_eq!(gas_station.display_name(), "oxums_station");

    let airfield = index.find_by_name("airfield_1").unwrap();
    assert!(airfield.alias().is_none());
    assert_eq!(airfield.display_name(), "airfield_1");

    assert!(index.tunnels().iter().all(|f| f.alias().is_none()));
}

#[test]
fn test_builds_are_deterministic() {
    let config = MonumentIndexConfig::default();
    let world = sample_world();

    let first = SpatialIndexBuilder::new(&config).build(&world);
    let second = SpatialIndexBuilder::new(&config).build(&world);

    let ids = |index: &crate::spatial::SpatialIndex| {
        index.all().iter().map(|f| f.id().to_string()).collect::<Vec<_>>()
    };

    assert_eq!(first.len(), second.len());
    assert_eq!(first.monuments().len(), second.monuments().len());
    assert_eq!(first.tunnels().len(), second.tunnels().len());
    assert_eq!(first.facility_modules().len(), second.facility_modules().len());
    assert_eq!(ids(&first), ids(&second));
}

#[test]
fn test_unavailable_links_leave_other_categories() {
    let world = FakeWorld {
        links_unavailable: true,
        ..sample_world()
    };
    let config = MonumentIndexConfig::default();
    let index = SpatialIndexBuilder::new(&config).build(&world);

    assert!(index.facility_modules().is_empty());
    assert_eq!(index.tunnels().len(), 2);
    assert_eq!(index.monuments().len(), 2);
}

#[test]
fn test_bad_objects_are_skipped() {
    let mut world = sample_world();
    world.monuments.push(MonumentRecord {
        id: WorldObjectId(3),
        prefab_path: "assets/bundled/prefabs/autospawn/monument/broken.prefab".to_string(),
        pose: Pose::from_position(Point3::new(f32::NAN, 0.0, 0.0)),
        bounds: LocalBounds::new(Vec3::zeros(), Vec3::new(5.0, 5.0, 5.0)),
    });
    world.links.push(link("empty_module", BaseLinkType::Segment, &[]));

    let config = MonumentIndexConfig::default();
    let index = SpatialIndexBuilder::new(&config).build(&world);

    assert_eq!(index.len(), 6);
    assert_eq!(index.report().skipped, 1);
    assert_eq!(index.report().excluded, 4);
    assert!(index.find_by_name("broken").is_none());
}

#[test]
fn test_nearest_any_scenario() {
    let world = FakeWorld {
        monuments: vec![
            monument(1, "monument/first.prefab", Point3::new(0.0, 0.0, 0.0), 10.0),
            monument(2, "monument/second.prefab", Point3::new(100.0, 0.0, 0.0), 10.0),
        ],
        ..FakeWorld::default()
    };
    let config = MonumentIndexConfig::default();
    let index = SpatialIndexBuilder::new(&config).build(&world);

    let p = Point3::new(1.0, 0.0, 0.0);
    let found = index.nearest_any(&p).unwrap();
    assert_eq!(found.short_name(), "first");
    assert_relative_eq!(found.distance_to_bounds(&p), 0.0, epsilon = EPSILON);

    let p = Point3::new(50.0, 0.0, 0.0);
    let found = index.nearest_any(&p).unwrap();
    assert_eq!(found.short_name(), "first");
    assert_relative_eq!(found.distance_to_bounds(&p), 45.0, epsilon = EPSILON);
}

#[test]
fn test_rotated_tunnel_footprint() {
    let world = FakeWorld {
        cells: vec![DungeonGridCell {
            prefab_path: "tunnel/straight-we-1.prefab".to_string(),
            pose: Pose::new(Point3::new(0.0, -100.0, 0.0), quat_from_euler_degrees([0.0, 45.0, 0.0])),
        }],
        ..FakeWorld::default()
    };
    let config = MonumentIndexConfig::default().with_tunnel_segment_size([40.0, 10.0, 4.0]);
    let index = SpatialIndexBuilder::new(&config).build(&world);

    let tunnel = &index.tunnels()[0];
    // 15 units along the rotated local X axis is inside, along world X it is not
    let along = tunnel.to_world(&Point3::new(15.0, 0.0, 0.0));
    assert!(tunnel.is_in_bounds(&along));
    assert!(!tunnel.is_in_bounds(&Point3::new(15.0, -100.0, 0.0)));
}

#[test]
fn test_where_am_i_reports() {
    let config = MonumentIndexConfig::default();
    let index = SpatialIndexBuilder::new(&config).build(&sample_world());

    match where_am_i(&index, &Point3::new(2.0, 1.0, -3.0)) {
        LocationReport::Inside { feature, local } => {
            assert_eq!(feature.display_name(), "oxums_station");
            assert_relative_eq!(local, Point3::new(2.0, 1.0, -3.0), epsilon = EPSILON);
        }
        other => panic!("expected inside, got {other:?}"),
    }

    let report = where_am_i(&index, &Point3::new(100.0, 0.0, 20.0));
    match &report {
        LocationReport::Nearest { feature, distance } => {
            assert_eq!(feature.short_name(), "airfield_1");
            assert_relative_eq!(*distance, 15.0, epsilon = EPSILON);
        }
        other => panic!("expected nearest, got {other:?}"),
    }
    assert_eq!(report.to_string(), "Nearest monument is airfield_1, 15.0m away");

    let empty = SpatialIndexBuilder::new(&config).build(&FakeWorld::default());
    let report = where_am_i(&empty, &Point3::origin());
    assert!(matches!(report, LocationReport::NoFeatures));
    assert_eq!(report.to_string(), "No landmarks are indexed in this world");
}

#[test]
fn test_find_nearest_handle() {
    let config = MonumentIndexConfig::default();
    let index = SpatialIndexBuilder::new(&config).build(&sample_world());
    let p = Point3::new(0.0, -190.0, 0.0);

    let handle = find_nearest(&index, &p, FeatureKinds::all()).unwrap();
    assert_eq!(handle.kind(), FeatureKind::TrainTunnelSegment);
    assert_eq!(handle.short_name(), "straight-sn-0");
    assert!(handle.is_in_bounds(&Point3::new(0.0, -196.0, 0.0)));

    let handle = find_nearest(&index, &p, FeatureKinds::MONUMENTS).unwrap();
    assert_eq!(handle.short_name(), "gas_station_1");
    assert_relative_eq!(handle.distance_to_bounds(&p), 185.0, epsilon = EPSILON);
    assert_relative_eq!(handle.closest_point_on_bounds(&p), Point3::new(0.0, -5.0, 0.0), epsilon = EPSILON);

    assert!(find_nearest(&index, &p, FeatureKinds::empty()).is_none());
}

#[test]
fn test_service_publishes_and_keeps_old_snapshots() {
    let mut service = MonumentService::new(MonumentIndexConfig::default()).unwrap();
    assert!(!service.is_loaded());
    assert!(service.nearest_any(&Point3::origin()).is_none());

    let first = service.load(&sample_world()).unwrap();
    assert_eq!(first.len(), 6);

    let handle = find_nearest(&first, &Point3::origin(), FeatureKinds::MONUMENTS).unwrap();

    let smaller = FakeWorld {
        monuments: vec![monument(5, "monument/lighthouse.prefab", Point3::new(10.0, 0.0, 0.0), 4.0)],
        ..FakeWorld::default()
    };
    let second = service.load(&smaller).unwrap();

    // Earlier readers are unaffected by the reload
    assert_eq!(first.len(), 6);
    assert_eq!(handle.short_name(), "gas_station_1");

    assert_eq!(second.len(), 1);
    assert_eq!(service.snapshot().unwrap().len(), 1);
    assert_eq!(service.nearest_monument(&Point3::origin()).unwrap().short_name(), "lighthouse");

    assert!(service.unload().is_some());
    assert!(!service.is_loaded());
}

#[test]
fn test_disabled_service_builds_nothing() {
    let mut service = MonumentService::new(MonumentIndexConfig::default().with_enabled(false)).unwrap();

    let result = service.load(&sample_world());
    assert!(matches!(result, Err(MonumentError::Disabled)));
    assert!(service.snapshot().is_none());
}

#[test]
fn test_invalid_config_rejected() {
    let config = MonumentIndexConfig::default().with_tunnel_segment_size([20.0, -1.0, 20.0]);
    assert!(matches!(MonumentService::new(config), Err(MonumentError::Config(_))));
}
